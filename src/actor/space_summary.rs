//! Space summary
//!
//! Everything `space` shows about one space: its organization, apps,
//! service instances, quota and security groups, fetched in this order:
//!
//! 1. organization by GUID
//! 2. space by name inside the organization
//! 3. applications
//! 4. service instances
//! 5. space quota, only when the space has one
//! 6. running security groups
//! 7. staging security groups
//!
//! Warnings of every step are kept; the first failing step ends the
//! operation and no summary is built.

use super::security_group::{extract_rules, sort_rules, Lifecycle, SecurityGroupRule};
use super::Actor;
use crate::cloudcontroller::{Error, Warned, Warnings};
use futures::future::join_all;
use serde::Serialize;

/// Aggregate view of one space, with every name list sorted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SpaceSummary {
    pub space_name: String,
    pub space_guid: String,
    pub org_name: String,
    pub app_names: Vec<String>,
    pub service_instance_names: Vec<String>,
    /// Empty when the space has no quota
    pub space_quota_name: String,
    /// Names of the running security groups
    pub security_group_names: Vec<String>,
    /// Running and staging rules, ordered by group, lifecycle, then rule
    pub security_group_rules: Vec<SecurityGroupRule>,
}

impl Actor {
    /// Build the summary of the space `name` in organization `org_guid`
    pub async fn get_space_summary_by_organization_and_name(
        &self,
        org_guid: &str,
        name: &str,
    ) -> Warned<SpaceSummary> {
        let mut warnings = Warnings::new();
        let value = self.build_space_summary(org_guid, name, &mut warnings).await;
        Warned::new(value, warnings)
    }

    /// Summaries of several spaces of one organization, fetched concurrently.
    ///
    /// Results come back in the order of `names`, each with its own warnings.
    pub async fn get_space_summaries(
        &self,
        org_guid: &str,
        names: &[String],
    ) -> Vec<Warned<SpaceSummary>> {
        join_all(
            names
                .iter()
                .map(|name| self.get_space_summary_by_organization_and_name(org_guid, name)),
        )
        .await
    }

    async fn build_space_summary(
        &self,
        org_guid: &str,
        name: &str,
        warnings: &mut Warnings,
    ) -> Result<SpaceSummary, Error> {
        let org = warnings.absorb(self.get_organization(org_guid).await)?;

        let space = warnings.absorb(
            self.get_space_by_organization_and_name(&org.guid, name)
                .await,
        )?;

        let apps = warnings.absorb(self.get_applications_by_space(&space.guid).await)?;
        let app_names = sorted_names(apps.into_iter().map(|app| app.name));

        let service_instances =
            warnings.absorb(self.get_service_instances_by_space(&space.guid).await)?;
        let service_instance_names =
            sorted_names(service_instances.into_iter().map(|instance| instance.name));

        let space_quota_name = match space.space_quota_definition_guid.as_deref() {
            Some(quota_guid) => warnings.absorb(self.get_space_quota(quota_guid).await)?.name,
            None => String::new(),
        };

        let running =
            warnings.absorb(self.get_space_running_security_groups_by_space(&space.guid).await)?;
        let mut security_group_rules: Vec<SecurityGroupRule> = running
            .iter()
            .flat_map(|group| extract_rules(group, Lifecycle::Running))
            .collect();
        let security_group_names = sorted_names(running.into_iter().map(|group| group.name));

        let staging =
            warnings.absorb(self.get_space_staging_security_groups_by_space(&space.guid).await)?;
        security_group_rules.extend(
            staging
                .iter()
                .flat_map(|group| extract_rules(group, Lifecycle::Staging)),
        );
        sort_rules(&mut security_group_rules);

        tracing::debug!(
            "space summary {}/{}: {} app(s), {} service instance(s), {} rule(s)",
            org.name,
            space.name,
            app_names.len(),
            service_instance_names.len(),
            security_group_rules.len()
        );

        Ok(SpaceSummary {
            space_name: space.name,
            space_guid: space.guid,
            org_name: org.name,
            app_names,
            service_instance_names,
            space_quota_name,
            security_group_names,
            security_group_rules,
        })
    }
}

fn sorted_names(names: impl Iterator<Item = String>) -> Vec<String> {
    let mut names: Vec<String> = names.collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_names() {
        let names = sorted_names(["zeta", "alpha", "Mid", "alpha"].into_iter().map(String::from));
        assert_eq!(names, vec!["Mid", "alpha", "alpha", "zeta"]);
    }
}
