//! Security Groups
//!
//! Spaces have two independent sets of security groups: the ones applied
//! to running applications and the ones applied while staging. Both use the
//! same resource shape.

use super::client::Client;
use super::request::{Filter, Request, Route};
use super::resource::{null_as_default, Metadata, Resource, ResourceKind};
use super::warnings::Warned;
use serde::{Deserialize, Serialize};

/// One egress rule as returned by the API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(default, deserialize_with = "null_as_default")]
    pub protocol: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub destination: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ports: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// ICMP type and code
    #[serde(default, rename = "type")]
    pub icmp_type: Option<i32>,
    #[serde(default)]
    pub code: Option<i32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub log: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SecurityGroup {
    pub guid: String,
    pub name: String,
    pub rules: Vec<Rule>,
    pub running_default: bool,
    pub staging_default: bool,
}

#[derive(Debug, Deserialize)]
pub struct SecurityGroupEntity {
    name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    rules: Vec<Rule>,
    #[serde(default, deserialize_with = "null_as_default")]
    running_default: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    staging_default: bool,
}

impl Resource for SecurityGroup {
    const KIND: ResourceKind = ResourceKind::SecurityGroup;
    type Entity = SecurityGroupEntity;

    fn from_parts(metadata: Metadata, entity: SecurityGroupEntity) -> Self {
        Self {
            guid: metadata.guid,
            name: entity.name,
            rules: entity.rules,
            running_default: entity.running_default,
            staging_default: entity.staging_default,
        }
    }
}

impl Client {
    /// Security groups applied to running applications in a space
    pub async fn get_space_running_security_groups(
        &self,
        space_guid: &str,
        filters: &[Filter],
    ) -> Warned<Vec<SecurityGroup>> {
        let request = Request::new(
            Route::GetSpaceRunningSecurityGroups,
            &[("space_guid", space_guid)],
        )
        .with_filters(filters);
        self.list(request).await
    }

    /// Security groups applied while staging applications in a space
    pub async fn get_space_staging_security_groups(
        &self,
        space_guid: &str,
        filters: &[Filter],
    ) -> Warned<Vec<SecurityGroup>> {
        let request = Request::new(
            Route::GetSpaceStagingSecurityGroups,
            &[("space_guid", space_guid)],
        )
        .with_filters(filters);
        self.list(request).await
    }
}
