//! Request descriptors
//!
//! A [`Request`] is what the transport needs to issue one call: method,
//! path with URI parameters already substituted, query pairs and an
//! optional JSON body. [`Route`] names every endpoint the clients use.

use reqwest::Method;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Cloud Controller v2 endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    GetOrganizations,
    GetOrganization,
    GetOrganizationSpaces,
    GetSpace,
    PostSpace,
    PutSpace,
    DeleteSpace,
    GetSpaceApps,
    GetSpaceServiceInstances,
    GetSpaceQuotaDefinition,
    GetSpaceRunningSecurityGroups,
    GetSpaceStagingSecurityGroups,
}

impl Route {
    pub fn method(self) -> Method {
        match self {
            Route::PostSpace => Method::POST,
            Route::PutSpace => Method::PUT,
            Route::DeleteSpace => Method::DELETE,
            _ => Method::GET,
        }
    }

    pub fn template(self) -> &'static str {
        match self {
            Route::GetOrganizations => "/v2/organizations",
            Route::GetOrganization => "/v2/organizations/:organization_guid",
            Route::GetOrganizationSpaces => "/v2/organizations/:organization_guid/spaces",
            Route::GetSpace | Route::PutSpace | Route::DeleteSpace => "/v2/spaces/:space_guid",
            Route::PostSpace => "/v2/spaces",
            Route::GetSpaceApps => "/v2/spaces/:space_guid/apps",
            Route::GetSpaceServiceInstances => "/v2/spaces/:space_guid/service_instances",
            Route::GetSpaceQuotaDefinition => "/v2/space_quota_definitions/:space_quota_guid",
            Route::GetSpaceRunningSecurityGroups => "/v2/spaces/:space_guid/security_groups",
            Route::GetSpaceStagingSecurityGroups => {
                "/v2/spaces/:space_guid/staging_security_groups"
            }
        }
    }
}

/// One request to the API
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    /// Path relative to the API root; may already carry a query string
    /// (next-page links do)
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl Request {
    /// Build a request for a route, substituting `:name` segments
    pub fn new(route: Route, uri_params: &[(&str, &str)]) -> Self {
        let params: HashMap<&str, &str> = uri_params.iter().copied().collect();
        let path = route
            .template()
            .split('/')
            .map(|segment| match segment.strip_prefix(':') {
                Some(name) => {
                    let value = params.get(name);
                    debug_assert!(value.is_some(), "{route:?} is missing URI parameter {name}");
                    value
                        .map(|value| urlencoding::encode(value).into_owned())
                        .unwrap_or_default()
                }
                None => segment.to_string(),
            })
            .collect::<Vec<_>>()
            .join("/");

        Self {
            method: route.method(),
            path,
            query: Vec::new(),
            body: None,
        }
    }

    /// GET a link returned by the API, such as `next_url`
    pub fn link(path: &str) -> Self {
        Self {
            method: Method::GET,
            path: path.to_string(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn with_query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    pub fn with_filters(mut self, filters: &[Filter]) -> Self {
        for filter in filters {
            self.query.push(("q".to_string(), filter.to_string()));
        }
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Filterable fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Name,
    OrganizationGuid,
    SpaceGuid,
}

impl FilterField {
    fn as_str(self) -> &'static str {
        match self {
            FilterField::Name => "name",
            FilterField::OrganizationGuid => "organization_guid",
            FilterField::SpaceGuid => "space_guid",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    Equal,
    In,
}

/// A `q=` filter, e.g. `name:dev` or `name IN dev,prod`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub field: FilterField,
    pub operator: FilterOperator,
    pub values: Vec<String>,
}

impl Filter {
    pub fn equal(field: FilterField, value: &str) -> Self {
        Self {
            field,
            operator: FilterOperator::Equal,
            values: vec![value.to_string()],
        }
    }

    pub fn one_of(field: FilterField, values: &[&str]) -> Self {
        Self {
            field,
            operator: FilterOperator::In,
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    pub fn name(value: &str) -> Self {
        Self::equal(FilterField::Name, value)
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.operator {
            FilterOperator::Equal => {
                write!(f, "{}:{}", self.field.as_str(), self.values.join(","))
            }
            FilterOperator::In => {
                write!(f, "{} IN {}", self.field.as_str(), self.values.join(","))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitutes_uri_params() {
        let request = Request::new(Route::GetSpaceApps, &[("space_guid", "space-1")]);
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.path, "/v2/spaces/space-1/apps");
    }

    #[test]
    fn test_escapes_uri_params() {
        let request = Request::new(Route::GetOrganization, &[("organization_guid", "a/b")]);
        assert_eq!(request.path, "/v2/organizations/a%2Fb");
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "missing URI parameter space_guid")]
    fn test_missing_uri_param_panics() {
        let _ = Request::new(Route::GetSpaceApps, &[("organization_guid", "org-1")]);
    }

    #[test]
    fn test_route_methods() {
        assert_eq!(Route::DeleteSpace.method(), Method::DELETE);
        assert_eq!(Route::PostSpace.method(), Method::POST);
        assert_eq!(Route::PutSpace.method(), Method::PUT);
        assert_eq!(Route::GetSpaceStagingSecurityGroups.method(), Method::GET);
    }

    #[test]
    fn test_filters_render_as_q_params() {
        let request = Request::new(Route::GetOrganizations, &[]).with_filters(&[
            Filter::name("org1"),
            Filter::one_of(FilterField::SpaceGuid, &["s1", "s2"]),
            Filter::equal(FilterField::OrganizationGuid, "o1"),
        ]);

        assert_eq!(
            request.query,
            vec![
                ("q".to_string(), "name:org1".to_string()),
                ("q".to_string(), "space_guid IN s1,s2".to_string()),
                ("q".to_string(), "organization_guid:o1".to_string()),
            ]
        );
    }
}
