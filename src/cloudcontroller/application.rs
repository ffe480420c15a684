//! Applications

use super::client::Client;
use super::request::{Filter, Request, Route};
use super::resource::{null_as_default, Metadata, Resource, ResourceKind};
use super::warnings::Warned;
use serde::{Deserialize, Serialize};

/// Cloud Controller application
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Application {
    pub guid: String,
    pub name: String,
    pub space_guid: String,
    /// Desired state, `STARTED` or `STOPPED`
    pub state: String,
    pub instances: u32,
}

#[derive(Debug, Deserialize)]
pub struct ApplicationEntity {
    name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    space_guid: String,
    #[serde(default, deserialize_with = "null_as_default")]
    state: String,
    #[serde(default, deserialize_with = "null_as_default")]
    instances: u32,
}

impl Resource for Application {
    const KIND: ResourceKind = ResourceKind::Application;
    type Entity = ApplicationEntity;

    fn from_parts(metadata: Metadata, entity: ApplicationEntity) -> Self {
        Self {
            guid: metadata.guid,
            name: entity.name,
            space_guid: entity.space_guid,
            state: entity.state,
            instances: entity.instances,
        }
    }
}

impl Client {
    /// List the applications of a space
    pub async fn get_space_applications(
        &self,
        space_guid: &str,
        filters: &[Filter],
    ) -> Warned<Vec<Application>> {
        let request = Request::new(Route::GetSpaceApps, &[("space_guid", space_guid)])
            .with_filters(filters);
        self.list(request).await
    }
}
