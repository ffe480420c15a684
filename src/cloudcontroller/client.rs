//! Cloud Controller Client
//!
//! Entry point for the resource clients. The per-resource operations live
//! next to their resource types (`organization.rs`, `space.rs`, ...).

use super::error::Error;
use super::http::{ClientConfig, CloudControllerConnection, Connection};
use super::paginate::paginate;
use super::request::Request;
use super::resource::{decode, Resource, ResourceKind};
use super::warnings::Warned;
use serde_json::Value;
use std::sync::Arc;

/// Stateless client for the Cloud Controller v2 API
#[derive(Clone)]
pub struct Client {
    connection: Arc<dyn Connection>,
}

impl Client {
    /// Create a client talking HTTP to `config.target`
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        let connection = CloudControllerConnection::new(config)?;
        Ok(Self::with_connection(Arc::new(connection)))
    }

    /// Create a client over any transport
    pub fn with_connection(connection: Arc<dyn Connection>) -> Self {
        Self { connection }
    }

    /// List every item of a paginated endpoint
    pub(crate) async fn list<T: Resource>(&self, request: Request) -> Warned<Vec<T>> {
        paginate(self.connection.as_ref(), request).await
    }

    /// List with a name filter and require exactly one match
    pub(crate) async fn find_by_name<T: Resource>(&self, request: Request, name: &str) -> Warned<T> {
        self.list::<T>(request)
            .await
            .and_then(|items| single(items, T::KIND, name))
    }

    /// GET a single resource; a 404 becomes [`Error::NotFound`] keyed by `guid`
    pub(crate) async fn get<T: Resource>(&self, request: Request, guid: &str) -> Warned<T> {
        self.send(request)
            .await
            .and_then(|body| decode::<T>(body))
            .map_err_not_found(T::KIND, guid)
    }

    /// Issue one request and return its raw body
    pub(crate) async fn send(&self, request: Request) -> Warned<Value> {
        match self.connection.make(&request).await {
            Ok(response) => Warned::ok(response.body, response.warnings),
            Err((err, warnings)) => Warned::err(err, warnings),
        }
    }
}

impl<T> Warned<T> {
    fn map_err_not_found(self, kind: ResourceKind, key: &str) -> Self {
        Warned {
            value: self.value.map_err(|err| err.not_found_on_404(kind, key)),
            warnings: self.warnings,
        }
    }
}

/// Reduce a name lookup to its single match
fn single<T>(mut items: Vec<T>, kind: ResourceKind, name: &str) -> Result<T, Error> {
    match items.len() {
        0 => Err(Error::NotFound {
            kind,
            key: name.to_string(),
        }),
        1 => Ok(items.remove(0)),
        count => Err(Error::AmbiguousName {
            kind,
            key: name.to_string(),
            count,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloudcontroller::paginate::tests::ScriptedConnection;
    use crate::cloudcontroller::space::Space;
    use serde_json::json;

    fn space(name: &str) -> Value {
        json!({
            "metadata": {"guid": format!("{name}-guid"), "url": format!("/v2/spaces/{name}-guid")},
            "entity": {"name": name, "organization_guid": "org-guid"}
        })
    }

    #[tokio::test]
    async fn test_get_space_by_name_single_match() {
        let connection = Arc::new(
            ScriptedConnection::new().page(json!({"resources": [space("dev")]}), &["w1"]),
        );
        let client = Client::with_connection(connection.clone());

        let result = client.get_space_by_name("org-guid", "dev").await;

        assert_eq!(result.value.unwrap().guid, "dev-guid");
        assert_eq!(result.warnings.to_vec(), vec!["w1"]);
        assert_eq!(
            connection.requested(),
            vec!["/v2/organizations/org-guid/spaces"]
        );
    }

    #[tokio::test]
    async fn test_get_space_by_name_no_match_is_not_found() {
        let connection =
            Arc::new(ScriptedConnection::new().page(json!({"resources": []}), &["w1"]));
        let client = Client::with_connection(connection);

        let result = client.get_space_by_name("org-guid", "missing").await;

        match result.value {
            Err(Error::NotFound { kind, key }) => {
                assert_eq!(kind, ResourceKind::Space);
                assert_eq!(key, "missing");
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
        assert_eq!(result.warnings.to_vec(), vec!["w1"]);
    }

    #[tokio::test]
    async fn test_get_space_by_name_several_matches_is_ambiguous() {
        let connection = Arc::new(
            ScriptedConnection::new().page(json!({"resources": [space("dev"), space("dev")]}), &[]),
        );
        let client = Client::with_connection(connection);

        let result = client.get_space_by_name("org-guid", "dev").await;

        assert!(matches!(
            result.value,
            Err(Error::AmbiguousName { count: 2, .. })
        ));
    }

    #[tokio::test]
    async fn test_get_maps_404_to_not_found() {
        let connection = Arc::new(
            ScriptedConnection::new().failure(reqwest::StatusCode::NOT_FOUND, &["gone"]),
        );
        let client = Client::with_connection(connection);

        let result = client.get::<Space>(Request::link("/v2/spaces/x"), "x").await;

        assert!(matches!(
            result.value,
            Err(Error::NotFound { kind: ResourceKind::Space, ref key }) if key == "x"
        ));
        assert_eq!(result.warnings.to_vec(), vec!["gone"]);
    }
}
