//! Organizations

use super::client::Client;
use super::request::{Filter, Request, Route};
use super::resource::{null_as_default, Metadata, Resource, ResourceKind};
use super::warnings::Warned;
use serde::{Deserialize, Serialize};

/// Cloud Controller organization
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Organization {
    pub guid: String,
    pub name: String,
    /// Organization quota definition, if any
    pub quota_definition_guid: Option<String>,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct OrganizationEntity {
    name: String,
    #[serde(default)]
    quota_definition_guid: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    status: String,
}

impl Resource for Organization {
    const KIND: ResourceKind = ResourceKind::Organization;
    type Entity = OrganizationEntity;

    fn from_parts(metadata: Metadata, entity: OrganizationEntity) -> Self {
        Self {
            guid: metadata.guid,
            name: entity.name,
            quota_definition_guid: entity.quota_definition_guid.filter(|g| !g.is_empty()),
            status: entity.status,
        }
    }
}

impl Client {
    /// List organizations matching `filters`
    pub async fn get_organizations(&self, filters: &[Filter]) -> Warned<Vec<Organization>> {
        let request = Request::new(Route::GetOrganizations, &[]).with_filters(filters);
        self.list(request).await
    }

    /// Get one organization by GUID
    pub async fn get_organization(&self, guid: &str) -> Warned<Organization> {
        let request = Request::new(Route::GetOrganization, &[("organization_guid", guid)]);
        self.get(request, guid).await
    }

    /// Get the organization with exactly this name
    pub async fn get_organization_by_name(&self, name: &str) -> Warned<Organization> {
        let request =
            Request::new(Route::GetOrganizations, &[]).with_filters(&[Filter::name(name)]);
        self.find_by_name(request, name).await
    }
}
