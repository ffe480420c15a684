//! HTTP transport for Cloud Controller calls

use super::error::{Error, TransportError};
use super::request::Request;
use super::warnings::{Warnings, WARNINGS_HEADER};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Url};
use serde_json::Value;
use std::time::Duration;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Per-request correlation header understood by the platform router
const REQUEST_ID_HEADER: &str = "X-Vcap-Request-Id";

/// Sanitize response body for logging
/// Truncates long responses and strips non-printable characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let cut = (0..=MAX_LOG_BODY_LENGTH)
            .rev()
            .find(|i| body.is_char_boundary(*i))
            .unwrap_or(0);
        format!("{}... [truncated, {} bytes total]", &body[..cut], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// Decoded response: JSON body (`Null` when empty) plus server warnings
#[derive(Debug, Clone)]
pub struct Response {
    pub body: Value,
    pub warnings: Warnings,
}

/// Transport seam used by the resource clients.
///
/// A failed request still reports the warnings the server attached to it.
#[async_trait]
pub trait Connection: Send + Sync {
    async fn make(&self, request: &Request) -> Result<Response, (Error, Warnings)>;
}

/// Settings for [`CloudControllerConnection`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root, e.g. `https://api.example.com`
    pub target: String,
    /// Bearer token; acquiring and refreshing it is the caller's job
    pub access_token: Option<String>,
    pub skip_ssl_validation: bool,
    pub dial_timeout: Duration,
    /// Deadline applied to every request
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(target: &str) -> Self {
        Self {
            target: target.to_string(),
            access_token: None,
            skip_ssl_validation: false,
            dial_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(60),
            user_agent: format!("cfsummary/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    pub fn with_token(mut self, token: &str) -> Self {
        self.access_token = Some(token.to_string());
        self
    }
}

/// reqwest-backed connection to a Cloud Controller
#[derive(Clone)]
pub struct CloudControllerConnection {
    client: Client,
    base: Url,
    token: Option<String>,
}

impl CloudControllerConnection {
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .connect_timeout(config.dial_timeout)
            .timeout(config.request_timeout)
            .danger_accept_invalid_certs(config.skip_ssl_validation)
            .build()?;

        Ok(Self {
            client,
            base: Url::parse(&config.target)?,
            token: config.access_token.clone(),
        })
    }

    fn url_for(&self, request: &Request) -> Result<Url, Error> {
        let mut url = self.base.join(&request.path)?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }
        Ok(url)
    }

    async fn send(&self, request: &Request, warnings: &mut Warnings) -> Result<Value, Error> {
        let url = self.url_for(request)?;
        let request_id = uuid::Uuid::new_v4().to_string();
        tracing::debug!("{} {} [{}]", request.method, url, request_id);

        let mut builder = self
            .client
            .request(request.method.clone(), url)
            .header(REQUEST_ID_HEADER, request_id);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;

        if let Some(header) = response
            .headers()
            .get(WARNINGS_HEADER)
            .and_then(|v| v.to_str().ok())
        {
            let received = Warnings::from_header(header);
            if !received.is_empty() {
                tracing::warn!("API returned {} warning(s) for {}", received.len(), request.path);
            }
            warnings.append(received);
        }

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Only log sanitized/truncated error body to avoid leaking sensitive data
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&body));
            return Err(TransportError::status(status, &body).into());
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl Connection for CloudControllerConnection {
    async fn make(&self, request: &Request) -> Result<Response, (Error, Warnings)> {
        let mut warnings = Warnings::new();
        match self.send(request, &mut warnings).await {
            Ok(body) => Ok(Response { body, warnings }),
            Err(err) => Err((err, warnings)),
        }
    }
}
