//! Paginator
//!
//! Walks a v2 list endpoint page by page, following `next_url` until the
//! last page, and feeds every item to a callback.

use super::error::{Error, TransportError};
use super::http::Connection;
use super::request::Request;
use super::resource::{decode, Resource};
use super::warnings::{Warned, Warnings};
use serde::Deserialize;
use serde_json::Value;

/// One page of a v2 list response
#[derive(Debug, Deserialize)]
struct Page {
    #[serde(default)]
    next_url: Option<String>,
    resources: Vec<Value>,
}

/// Fetch every page starting at `request` and hand each raw item to
/// `on_item` in page order. Warnings of every fetched page are appended to
/// `warnings`, including the page that failed.
pub async fn paginate_with<F>(
    connection: &dyn Connection,
    request: Request,
    warnings: &mut Warnings,
    mut on_item: F,
) -> Result<(), Error>
where
    F: FnMut(Value) -> Result<(), Error>,
{
    let mut next = Some(request);
    let mut page_number = 0usize;

    while let Some(request) = next.take() {
        page_number += 1;

        let response = match connection.make(&request).await {
            Ok(response) => response,
            Err((err, page_warnings)) => {
                warnings.append(page_warnings);
                return Err(err);
            }
        };
        warnings.append(response.warnings);

        let page = Page::deserialize(response.body).map_err(TransportError::Decode)?;
        tracing::debug!(
            "page {} of {}: {} item(s)",
            page_number,
            request.path,
            page.resources.len()
        );

        for item in page.resources {
            on_item(item)?;
        }

        next = page
            .next_url
            .filter(|url| !url.is_empty())
            .map(|url| Request::link(&url));
    }

    Ok(())
}

/// Fetch and decode every item of a list endpoint as `T`.
///
/// An item of the wrong type aborts the listing with
/// [`Error::UnknownObjectInList`]; no partial collection is returned.
pub async fn paginate<T: Resource>(connection: &dyn Connection, request: Request) -> Warned<Vec<T>> {
    let mut warnings = Warnings::new();
    let mut items = Vec::new();

    let result = paginate_with(connection, request, &mut warnings, |item| {
        items.push(decode::<T>(item)?);
        Ok(())
    })
    .await;

    Warned::new(result.map(|()| items), warnings)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::cloudcontroller::http::Response;
    use crate::cloudcontroller::request::Route;
    use crate::cloudcontroller::resource::{Metadata, ResourceKind};
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays scripted responses in order and records requested paths
    pub(crate) struct ScriptedConnection {
        responses: Mutex<VecDeque<Result<Response, (Error, Warnings)>>>,
        pub(crate) paths: Mutex<Vec<String>>,
    }

    impl ScriptedConnection {
        pub(crate) fn new() -> Self {
            Self {
                responses: Mutex::new(VecDeque::new()),
                paths: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn page(self, body: Value, warnings: &[&str]) -> Self {
            self.responses.lock().unwrap().push_back(Ok(Response {
                body,
                warnings: Warnings::from_iter(warnings.iter().copied()),
            }));
            self
        }

        pub(crate) fn failure(self, status: StatusCode, warnings: &[&str]) -> Self {
            self.responses.lock().unwrap().push_back(Err((
                TransportError::status(status, "").into(),
                Warnings::from_iter(warnings.iter().copied()),
            )));
            self
        }

        pub(crate) fn requested(&self) -> Vec<String> {
            self.paths.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Connection for ScriptedConnection {
        async fn make(&self, request: &Request) -> Result<Response, (Error, Warnings)> {
            self.paths.lock().unwrap().push(request.path.clone());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected request")
        }
    }

    #[derive(Debug)]
    struct Thing {
        name: String,
    }

    #[derive(Deserialize)]
    struct ThingEntity {
        name: String,
    }

    impl Resource for Thing {
        const KIND: ResourceKind = ResourceKind::Application;
        type Entity = ThingEntity;

        fn from_parts(_: Metadata, entity: ThingEntity) -> Self {
            Self { name: entity.name }
        }
    }

    fn item(name: &str) -> Value {
        json!({
            "metadata": {"guid": format!("{name}-guid"), "url": format!("/v2/apps/{name}-guid")},
            "entity": {"name": name}
        })
    }

    fn names(things: &[Thing]) -> Vec<&str> {
        things.iter().map(|t| t.name.as_str()).collect()
    }

    fn seed() -> Request {
        Request::new(Route::GetSpaceApps, &[("space_guid", "space-guid")])
    }

    #[tokio::test]
    async fn test_follows_next_url_in_order() {
        let connection = ScriptedConnection::new()
            .page(
                json!({"next_url": "/v2/spaces/space-guid/apps?page=2", "resources": [item("a"), item("b")]}),
                &["page one"],
            )
            .page(
                json!({"next_url": "/v2/spaces/space-guid/apps?page=3", "resources": []}),
                &[],
            )
            .page(
                json!({"next_url": null, "resources": [item("c")]}),
                &["page three"],
            );

        let result = paginate::<Thing>(&connection, seed()).await;

        let things = result.value.unwrap();
        assert_eq!(names(&things), vec!["a", "b", "c"]);
        assert_eq!(result.warnings.to_vec(), vec!["page one", "page three"]);
        assert_eq!(
            connection.requested(),
            vec![
                "/v2/spaces/space-guid/apps",
                "/v2/spaces/space-guid/apps?page=2",
                "/v2/spaces/space-guid/apps?page=3",
            ]
        );
    }

    #[tokio::test]
    async fn test_single_page_without_next_url() {
        let connection =
            ScriptedConnection::new().page(json!({"resources": [item("only")]}), &[]);

        let result = paginate::<Thing>(&connection, seed()).await;

        assert_eq!(names(&result.value.unwrap()), vec!["only"]);
        assert_eq!(connection.requested().len(), 1);
    }

    #[tokio::test]
    async fn test_wrong_type_aborts_with_no_results() {
        let org = json!({
            "metadata": {"guid": "org-guid", "url": "/v2/organizations/org-guid"},
            "entity": {"name": "org"}
        });
        let connection = ScriptedConnection::new()
            .page(
                json!({"next_url": "/v2/spaces/space-guid/apps?page=2", "resources": [item("a"), org]}),
                &["before failure"],
            )
            .page(json!({"resources": [item("never")]}), &[]);

        let result = paginate::<Thing>(&connection, seed()).await;

        assert!(matches!(
            result.value,
            Err(Error::UnknownObjectInList {
                expected: ResourceKind::Application,
                ..
            })
        ));
        assert_eq!(result.warnings.to_vec(), vec!["before failure"]);
        assert_eq!(connection.requested().len(), 1);
    }

    #[tokio::test]
    async fn test_transport_error_keeps_earlier_warnings() {
        let connection = ScriptedConnection::new()
            .page(
                json!({"next_url": "/v2/spaces/space-guid/apps?page=2", "resources": [item("a")]}),
                &["first page"],
            )
            .failure(StatusCode::INTERNAL_SERVER_ERROR, &["failing page"]);

        let result = paginate::<Thing>(&connection, seed()).await;

        let err = result.value.unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(result.warnings.to_vec(), vec!["first page", "failing page"]);
    }

    #[tokio::test]
    async fn test_malformed_page_is_transport_error() {
        let connection = ScriptedConnection::new().page(json!(["not", "a", "page"]), &[]);

        let result = paginate::<Thing>(&connection, seed()).await;

        assert!(matches!(
            result.value,
            Err(Error::Transport(TransportError::Decode(_)))
        ));
    }

    #[tokio::test]
    async fn test_single_resource_body_is_not_a_page() {
        let connection = ScriptedConnection::new().page(
            json!({
                "metadata": {"guid": "org-guid", "url": "/v2/organizations/org-guid"},
                "entity": {"name": "org"}
            }),
            &["envelope"],
        );

        let result = paginate::<Thing>(&connection, seed()).await;

        assert!(matches!(
            result.value,
            Err(Error::Transport(TransportError::Decode(_)))
        ));
        assert_eq!(result.warnings.to_vec(), vec!["envelope"]);
    }

    #[tokio::test]
    async fn test_body_without_resources_is_transport_error() {
        let connection = ScriptedConnection::new().page(json!({"next_url": null}), &[]);

        let result = paginate::<Thing>(&connection, seed()).await;

        assert!(matches!(
            result.value,
            Err(Error::Transport(TransportError::Decode(_)))
        ));
    }

    #[tokio::test]
    async fn test_callback_error_stops_iteration() {
        let connection = ScriptedConnection::new()
            .page(json!({"resources": [item("a"), item("b"), item("c")]}), &[]);
        let mut seen = 0;
        let mut warnings = Warnings::new();

        let result = paginate_with(&connection, seed(), &mut warnings, |_| {
            seen += 1;
            if seen == 2 {
                Err(Error::NotFound {
                    kind: ResourceKind::Application,
                    key: "stop".to_string(),
                })
            } else {
                Ok(())
            }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(seen, 2);
    }
}
