//! HTTP transport seam
//!
//! Endpoint groups build requests against the [`Transport`] trait rather
//! than a concrete HTTP library, so request assembly and signing can be
//! exercised without network I/O. [`HttpTransport`] is the production
//! implementation over `reqwest`.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{RestError, RestResult};
use mexc_types::MexcApiError;

/// Header carrying the API key on authenticated requests
pub const API_KEY_HEADER: &str = "X-MEXC-APIKEY";

/// Default REST endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.mexc.com";

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP verb for a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// DELETE
    Delete,
}

impl HttpMethod {
    /// Returns the verb as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

/// A fully assembled request, ready for a [`Transport`] to send
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP verb
    pub method: HttpMethod,
    /// Request path (e.g. "/api/v3/depth")
    pub path: String,
    /// Query string without leading '?', already encoded
    pub query: Option<String>,
    /// Url-encoded form body (signed requests sent via POST/DELETE)
    pub form_body: Option<String>,
    /// API key for the `X-MEXC-APIKEY` header, set on signed requests
    pub api_key: Option<String>,
}

impl HttpRequest {
    /// Create a request with no query, body, or key
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: None,
            form_body: None,
            api_key: None,
        }
    }

    /// Attach an encoded query string
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Attach an url-encoded form body
    pub fn with_form_body(mut self, body: impl Into<String>) -> Self {
        self.form_body = Some(body.into());
        self
    }

    /// Attach the API key header value
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

/// Capability to perform an HTTP exchange and return the raw body
///
/// Implementations own connection handling, TLS, and timeouts. No retry
/// or recovery policy is applied at this layer or above it.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and return the response body on success
    async fn send(&self, request: HttpRequest) -> RestResult<String>;
}

/// Error body shape returned by the exchange
#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: i32,
    msg: String,
}

/// Production transport over `reqwest`
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport for the given base URL
    pub fn new(base_url: &str, timeout: Duration, user_agent: Option<&str>) -> RestResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent.unwrap_or("mexc-rest/0.1.0"))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a transport for the production endpoint with default timeout
    pub fn with_defaults() -> RestResult<Self> {
        Self::new(
            DEFAULT_BASE_URL,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            None,
        )
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_url(&self, request: &HttpRequest) -> String {
        match &request.query {
            Some(q) if !q.is_empty() => format!("{}{}?{}", self.base_url, request.path, q),
            _ => format!("{}{}", self.base_url, request.path),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: HttpRequest) -> RestResult<String> {
        let url = self.build_url(&request);
        debug!(method = request.method.as_str(), path = %request.path, "sending request");

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        if let Some(api_key) = &request.api_key {
            builder = builder.header(API_KEY_HEADER, api_key);
        }

        if let Some(body) = request.form_body {
            builder = builder
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return Ok(body);
        }

        if status.as_u16() == 429 {
            warn!(path = %request.path, "rate limited");
            return Err(RestError::RateLimited {
                retry_after_ms: 60_000,
            });
        }

        match serde_json::from_str::<ErrorBody>(&body) {
            Ok(error_body) => Err(RestError::Api {
                error: MexcApiError::new(error_body.code, error_body.msg),
                status: status.as_u16(),
            }),
            Err(_) => Err(RestError::Http {
                status: status.as_u16(),
                body,
            }),
        }
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .finish()
    }
}
