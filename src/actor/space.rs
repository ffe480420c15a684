//! Space operations

use super::Actor;
use crate::cloudcontroller::{Space, Warned, Warnings};

impl Actor {
    /// Find a space by name inside an organization
    pub async fn get_space_by_organization_and_name(
        &self,
        organization_guid: &str,
        name: &str,
    ) -> Warned<Space> {
        self.client().get_space_by_name(organization_guid, name).await
    }

    /// Look up a space by name and delete it recursively
    pub async fn delete_space_by_organization_and_name(
        &self,
        organization_guid: &str,
        name: &str,
    ) -> Warned<()> {
        let mut warnings = Warnings::new();

        let space = match warnings.absorb(
            self.get_space_by_organization_and_name(organization_guid, name)
                .await,
        ) {
            Ok(space) => space,
            Err(err) => return Warned::err(err, warnings),
        };

        tracing::info!("deleting space {} ({})", space.name, space.guid);
        let value = warnings.absorb(self.client().delete_space(&space.guid).await);
        Warned::new(value, warnings)
    }
}
