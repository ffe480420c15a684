//! Cloud Controller errors

use super::resource::ResourceKind;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Errors returned by resource clients and actor operations
#[derive(Debug, Error)]
pub enum Error {
    /// A list item did not decode as the resource the list should contain
    #[error("unexpected object in {expected} list: {unexpected}")]
    UnknownObjectInList {
        expected: ResourceKind,
        unexpected: Value,
    },

    #[error("{kind} '{key}' not found")]
    NotFound { kind: ResourceKind, key: String },

    /// A lookup that must be unique matched several resources
    #[error("{count} {kind} resources named '{key}'")]
    AmbiguousName {
        kind: ResourceKind,
        key: String,
        count: usize,
    },

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Failures of the HTTP round-trip itself
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to send request: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid request URL: {0}")]
    Url(#[from] url::ParseError),

    /// Non-2xx response
    #[error("API request failed: {status}{}", code_suffix(.error_code))]
    Status {
        status: StatusCode,
        error_code: Option<String>,
        description: Option<String>,
    },

    #[error("failed to parse response JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

fn code_suffix(error_code: &Option<String>) -> String {
    error_code
        .as_deref()
        .map(|code| format!(" ({code})"))
        .unwrap_or_default()
}

impl TransportError {
    /// Build a status error, picking up the API's error document when the
    /// body is one
    pub fn status(status: StatusCode, body: &str) -> Self {
        #[derive(Deserialize)]
        struct ErrorDocument {
            #[serde(default)]
            description: Option<String>,
            #[serde(default)]
            error_code: Option<String>,
        }

        let document = serde_json::from_str::<ErrorDocument>(body).ok();
        Self::Status {
            status,
            error_code: document.as_ref().and_then(|d| d.error_code.clone()),
            description: document.and_then(|d| d.description),
        }
    }
}

impl Error {
    /// HTTP status of the failed request, if the server answered
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Transport(TransportError::Status { status, .. }) => Some(*status),
            _ => None,
        }
    }

    /// Convert a 404 from a by-GUID request into [`Error::NotFound`]
    pub(crate) fn not_found_on_404(self, kind: ResourceKind, key: &str) -> Self {
        if self.status() == Some(StatusCode::NOT_FOUND) {
            Error::NotFound {
                kind,
                key: key.to_string(),
            }
        } else {
            self
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Transport(err.into())
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::Transport(err.into())
    }
}

/// Format an error for display
/// Maps well-known statuses to short hints; everything else is truncated
pub fn format_error(error: &Error) -> String {
    match error {
        Error::NotFound { .. } | Error::AmbiguousName { .. } => return error.to_string(),
        Error::UnknownObjectInList { expected, .. } => {
            return format!("The API returned an unexpected object in a {expected} list.");
        }
        Error::Transport(TransportError::Status {
            description: Some(description),
            status,
            ..
        }) if !status.is_server_error() => return description.clone(),
        _ => {}
    }

    match error.status().map(|s| s.as_u16()) {
        Some(401) => return "Authentication failed. Provide a valid access token.".to_string(),
        Some(403) => return "Permission denied.".to_string(),
        Some(404) => return "Resource not found.".to_string(),
        Some(429) => return "Rate limit exceeded. Please try again later.".to_string(),
        Some(500..=599) => {
            return "Cloud Controller temporarily unavailable. Please try again.".to_string()
        }
        _ => {}
    }

    let error_str = error.to_string();
    let sanitized = error_str
        .chars()
        .filter(|c| c.is_ascii_graphic() || *c == ' ')
        .take(120)
        .collect::<String>();

    if sanitized.len() < error_str.len() {
        format!("{}...", sanitized)
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reads_error_document() {
        let err = TransportError::status(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"code":40002,"description":"The space name is taken: dev","error_code":"CF-SpaceNameTaken"}"#,
        );
        match err {
            TransportError::Status {
                error_code,
                description,
                ..
            } => {
                assert_eq!(error_code.as_deref(), Some("CF-SpaceNameTaken"));
                assert_eq!(description.as_deref(), Some("The space name is taken: dev"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_status_tolerates_non_json_body() {
        let err = TransportError::status(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");
        assert_eq!(err.to_string(), "API request failed: 502 Bad Gateway");
    }

    #[test]
    fn test_not_found_on_404_only_maps_404() {
        let not_found = Error::from(TransportError::status(StatusCode::NOT_FOUND, ""))
            .not_found_on_404(ResourceKind::SpaceQuota, "quota-guid");
        assert!(matches!(
            not_found,
            Error::NotFound { kind: ResourceKind::SpaceQuota, ref key } if key == "quota-guid"
        ));

        let forbidden = Error::from(TransportError::status(StatusCode::FORBIDDEN, ""))
            .not_found_on_404(ResourceKind::SpaceQuota, "quota-guid");
        assert_eq!(forbidden.status(), Some(StatusCode::FORBIDDEN));
    }

    #[test]
    fn test_format_error_hints() {
        let err = Error::from(TransportError::status(StatusCode::UNAUTHORIZED, ""));
        assert!(format_error(&err).contains("Authentication failed"));

        let err = Error::NotFound {
            kind: ResourceKind::Space,
            key: "missing".to_string(),
        };
        assert_eq!(format_error(&err), "Space 'missing' not found");
    }
}
