//! Spaces

use super::client::Client;
use super::request::{Filter, Request, Route};
use super::resource::{decode, null_as_default, Metadata, Resource, ResourceKind};
use super::warnings::Warned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Cloud Controller space
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Space {
    pub guid: String,
    pub name: String,
    pub organization_guid: String,
    /// Space quota assigned to the space. `None` when the space has none.
    pub space_quota_definition_guid: Option<String>,
    pub allow_ssh: bool,
}

#[derive(Debug, Deserialize)]
pub struct SpaceEntity {
    name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    organization_guid: String,
    #[serde(default)]
    space_quota_definition_guid: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    allow_ssh: bool,
}

impl Resource for Space {
    const KIND: ResourceKind = ResourceKind::Space;
    type Entity = SpaceEntity;

    fn from_parts(metadata: Metadata, entity: SpaceEntity) -> Self {
        Self {
            guid: metadata.guid,
            name: entity.name,
            organization_guid: entity.organization_guid,
            space_quota_definition_guid: entity
                .space_quota_definition_guid
                .filter(|g| !g.is_empty()),
            allow_ssh: entity.allow_ssh,
        }
    }
}

impl Client {
    /// List spaces of an organization matching `filters`
    pub async fn get_spaces(&self, organization_guid: &str, filters: &[Filter]) -> Warned<Vec<Space>> {
        let request = Request::new(
            Route::GetOrganizationSpaces,
            &[("organization_guid", organization_guid)],
        )
        .with_filters(filters);
        self.list(request).await
    }

    /// Get the space named `name` in an organization
    pub async fn get_space_by_name(&self, organization_guid: &str, name: &str) -> Warned<Space> {
        let request = Request::new(
            Route::GetOrganizationSpaces,
            &[("organization_guid", organization_guid)],
        )
        .with_filters(&[Filter::name(name)]);
        self.find_by_name(request, name).await
    }

    pub async fn get_space(&self, guid: &str) -> Warned<Space> {
        let request = Request::new(Route::GetSpace, &[("space_guid", guid)]);
        self.get(request, guid).await
    }

    /// Create a space, optionally assigning a space quota
    pub async fn create_space(
        &self,
        name: &str,
        organization_guid: &str,
        space_quota_guid: Option<&str>,
    ) -> Warned<Space> {
        let mut body = Map::new();
        body.insert("name".to_string(), json!(name));
        body.insert("organization_guid".to_string(), json!(organization_guid));
        if let Some(quota) = space_quota_guid.filter(|q| !q.is_empty()) {
            body.insert("space_quota_definition_guid".to_string(), json!(quota));
        }

        let request = Request::new(Route::PostSpace, &[]).with_body(Value::Object(body));
        self.send(request)
            .await
            .and_then(decode::<Space>)
    }

    pub async fn rename_space(&self, guid: &str, new_name: &str) -> Warned<()> {
        self.update_space(guid, json!({ "name": new_name })).await
    }

    pub async fn set_space_allow_ssh(&self, guid: &str, allow_ssh: bool) -> Warned<()> {
        self.update_space(guid, json!({ "allow_ssh": allow_ssh })).await
    }

    async fn update_space(&self, guid: &str, body: Value) -> Warned<()> {
        let request = Request::new(Route::PutSpace, &[("space_guid", guid)]).with_body(body);
        self.send(request).await.map(|_| ())
    }

    /// Delete a space together with everything in it
    pub async fn delete_space(&self, guid: &str) -> Warned<()> {
        let request =
            Request::new(Route::DeleteSpace, &[("space_guid", guid)]).with_query("recursive", "true");
        self.send(request).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_fields_decode_as_defaults() {
        let space: Space = decode(json!({
            "metadata": {"guid": "space-guid", "url": "/v2/spaces/space-guid"},
            "entity": {
                "name": "dev",
                "organization_guid": null,
                "space_quota_definition_guid": "",
                "allow_ssh": null
            }
        }))
        .unwrap();

        assert_eq!(space.name, "dev");
        assert_eq!(space.organization_guid, "");
        assert_eq!(space.space_quota_definition_guid, None);
        assert!(!space.allow_ssh);
    }
}
