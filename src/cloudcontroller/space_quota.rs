//! Space Quotas

use super::client::Client;
use super::request::{Request, Route};
use super::resource::{null_as_default, Metadata, Resource, ResourceKind};
use super::warnings::Warned;
use serde::{Deserialize, Serialize};

/// Space quota definition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SpaceQuota {
    pub guid: String,
    pub name: String,
    pub organization_guid: String,
    /// Memory limit in MB
    pub memory_limit: Option<u64>,
    /// -1 means unlimited
    pub total_services: Option<i64>,
    pub total_routes: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SpaceQuotaEntity {
    name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    organization_guid: String,
    #[serde(default)]
    memory_limit: Option<u64>,
    #[serde(default)]
    total_services: Option<i64>,
    #[serde(default)]
    total_routes: Option<i64>,
}

impl Resource for SpaceQuota {
    const KIND: ResourceKind = ResourceKind::SpaceQuota;
    type Entity = SpaceQuotaEntity;

    fn from_parts(metadata: Metadata, entity: SpaceQuotaEntity) -> Self {
        Self {
            guid: metadata.guid,
            name: entity.name,
            organization_guid: entity.organization_guid,
            memory_limit: entity.memory_limit,
            total_services: entity.total_services,
            total_routes: entity.total_routes,
        }
    }
}

impl Client {
    /// Get a space quota definition by GUID
    pub async fn get_space_quota(&self, guid: &str) -> Warned<SpaceQuota> {
        let request = Request::new(Route::GetSpaceQuotaDefinition, &[("space_quota_guid", guid)]);
        self.get(request, guid).await
    }
}
