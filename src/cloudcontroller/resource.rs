//! Resource decoding
//!
//! Every Cloud Controller v2 resource arrives as
//! `{"metadata": {"guid", "url", ...}, "entity": {...}}`. A [`Resource`]
//! describes how one resource type is built from that envelope, and
//! [`decode`] checks that an object really is of that type before building it.

use super::error::Error;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Kind of resource, used in errors and lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ResourceKind {
    Organization,
    Space,
    Application,
    ServiceInstance,
    SpaceQuota,
    SecurityGroup,
}

impl ResourceKind {
    /// Collection segment used in the resource's `metadata.url`
    pub fn collection(self) -> &'static str {
        match self {
            ResourceKind::Organization => "organizations",
            ResourceKind::Space => "spaces",
            ResourceKind::Application => "apps",
            ResourceKind::ServiceInstance => "service_instances",
            ResourceKind::SpaceQuota => "space_quota_definitions",
            ResourceKind::SecurityGroup => "security_groups",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::Organization => "Organization",
            ResourceKind::Space => "Space",
            ResourceKind::Application => "Application",
            ResourceKind::ServiceInstance => "Service instance",
            ResourceKind::SpaceQuota => "Space quota",
            ResourceKind::SecurityGroup => "Security group",
        };
        f.write_str(name)
    }
}

/// Common `metadata` block of a v2 resource
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Metadata {
    pub guid: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// A resource type that can be decoded from a v2 envelope
pub trait Resource: Sized {
    const KIND: ResourceKind;

    /// Wire shape of the `entity` block
    type Entity: DeserializeOwned;

    fn from_parts(metadata: Metadata, entity: Self::Entity) -> Self;
}

#[derive(Deserialize)]
struct Envelope<E> {
    metadata: Metadata,
    entity: E,
}

/// Decode one JSON object as `T`.
///
/// Fails with [`Error::UnknownObjectInList`] when the object does not have
/// `T`'s shape, or when its `metadata.url` points into a different collection.
pub fn decode<T: Resource>(value: Value) -> Result<T, Error> {
    if !url_matches(&value, T::KIND) {
        return Err(mismatch::<T>(value));
    }

    match Envelope::<T::Entity>::deserialize(&value) {
        Ok(envelope) => Ok(T::from_parts(envelope.metadata, envelope.entity)),
        Err(err) => {
            tracing::debug!("{} decode failed: {}", T::KIND, err);
            Err(mismatch::<T>(value))
        }
    }
}

fn mismatch<T: Resource>(unexpected: Value) -> Error {
    Error::UnknownObjectInList {
        expected: T::KIND,
        unexpected,
    }
}

/// A resource without a URL is accepted; one with a URL must live in the
/// expected collection, e.g. `/v2/apps/<guid>` for applications
fn url_matches(value: &Value, kind: ResourceKind) -> bool {
    let Some(url) = value
        .get("metadata")
        .and_then(|m| m.get("url"))
        .and_then(|u| u.as_str())
    else {
        return true;
    };

    url.trim_start_matches('/')
        .split('/')
        .nth(1)
        .is_some_and(|collection| collection == kind.collection())
}

/// Deserialize `null` as the type's default
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
