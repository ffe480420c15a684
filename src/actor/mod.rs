//! Actor layer
//!
//! Operations that combine several resource client calls into one result.
//! Every operation returns [`Warned`]: the warnings of all calls it made, in
//! call order, plus the value or the first error. Steps run one after the
//! other and the first failure stops the operation.
//!
//! - [`space`] - Space lookup and recursive deletion by name
//! - [`security_group`] - Rule flattening and ordering
//! - [`space_summary`] - The `SpaceSummary` aggregate

pub mod security_group;
pub mod space;
pub mod space_summary;

pub use security_group::{Lifecycle, SecurityGroupRule};
pub use space_summary::SpaceSummary;

use crate::cloudcontroller::{
    Application, Client, Organization, SecurityGroup, ServiceInstance, SpaceQuota, Warned,
};

/// Entry point for aggregate operations
#[derive(Clone)]
pub struct Actor {
    client: Client,
}

impl Actor {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub async fn get_organization(&self, guid: &str) -> Warned<Organization> {
        self.client.get_organization(guid).await
    }

    pub async fn get_organization_by_name(&self, name: &str) -> Warned<Organization> {
        self.client.get_organization_by_name(name).await
    }

    pub async fn get_applications_by_space(&self, space_guid: &str) -> Warned<Vec<Application>> {
        self.client.get_space_applications(space_guid, &[]).await
    }

    pub async fn get_service_instances_by_space(
        &self,
        space_guid: &str,
    ) -> Warned<Vec<ServiceInstance>> {
        self.client.get_space_service_instances(space_guid, &[]).await
    }

    pub async fn get_space_quota(&self, guid: &str) -> Warned<SpaceQuota> {
        self.client.get_space_quota(guid).await
    }

    pub async fn get_space_running_security_groups_by_space(
        &self,
        space_guid: &str,
    ) -> Warned<Vec<SecurityGroup>> {
        self.client
            .get_space_running_security_groups(space_guid, &[])
            .await
    }

    pub async fn get_space_staging_security_groups_by_space(
        &self,
        space_guid: &str,
    ) -> Warned<Vec<SecurityGroup>> {
        self.client
            .get_space_staging_security_groups(space_guid, &[])
            .await
    }
}
