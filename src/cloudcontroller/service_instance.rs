//! Service Instances

use super::client::Client;
use super::request::{Filter, Request, Route};
use super::resource::{null_as_default, Metadata, Resource, ResourceKind};
use super::warnings::Warned;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ServiceInstance {
    pub guid: String,
    pub name: String,
    pub space_guid: String,
    pub service_plan_guid: Option<String>,
    /// `managed_service_instance` or `user_provided_service_instance`
    pub instance_type: String,
}

impl ServiceInstance {
    pub fn is_user_provided(&self) -> bool {
        self.instance_type == "user_provided_service_instance"
    }
}

#[derive(Debug, Deserialize)]
pub struct ServiceInstanceEntity {
    name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    space_guid: String,
    #[serde(default)]
    service_plan_guid: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    instance_type: String,
}

impl Resource for ServiceInstance {
    const KIND: ResourceKind = ResourceKind::ServiceInstance;
    type Entity = ServiceInstanceEntity;

    fn from_parts(metadata: Metadata, entity: ServiceInstanceEntity) -> Self {
        Self {
            guid: metadata.guid,
            name: entity.name,
            space_guid: entity.space_guid,
            service_plan_guid: entity.service_plan_guid,
            instance_type: entity.instance_type,
        }
    }
}

impl Client {
    /// List the service instances of a space, user-provided ones included
    pub async fn get_space_service_instances(
        &self,
        space_guid: &str,
        filters: &[Filter],
    ) -> Warned<Vec<ServiceInstance>> {
        let request = Request::new(
            Route::GetSpaceServiceInstances,
            &[("space_guid", space_guid)],
        )
        .with_filters(filters)
        .with_query("return_user_provided_service_instances", "true");
        self.list(request).await
    }
}
