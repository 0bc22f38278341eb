//! HTTP client implementation and timing measurements
//!
//! Every request goes through [`HttpClient::get_json`], which never fails:
//! timeouts, connection errors and bodies that are not JSON are all folded
//! into the returned [`ApiResponse`] so a run always continues with the
//! next endpoint.

use crate::{
    defaults::RAW_SNIPPET_LIMIT,
    error::{AppError, Result},
    models::Config,
};
use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE},
    Client, Url,
};
use serde_json::{json, Value};
use std::time::{Duration, Instant};
use tokio::time::timeout;

/// Message recorded when a request exceeds its timeout
pub const TIMEOUT_MESSAGE: &str = "Request timeout";

/// Message recorded when a response body is not valid JSON
pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON response";

/// HTTP client trait for abstraction and testing
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// GET a URL and return its JSON body, elapsed time and status code
    async fn get_json(&self, url: &Url) -> ApiResponse;
}

/// Outcome of one GET request
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// Parsed body, or a synthetic `{"error": ...}` object on failure
    pub body: Value,
    pub elapsed: Duration,
    /// HTTP status, 0 when no response was received
    pub status_code: u16,
}

impl ApiResponse {
    /// Response for a request that produced no HTTP status
    pub fn network_failure(message: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            body: json!({ "error": message.into() }),
            elapsed,
            status_code: 0,
        }
    }

    /// Response for a request that ran out of time
    pub fn timed_out(elapsed: Duration) -> Self {
        Self::network_failure(TIMEOUT_MESSAGE, elapsed)
    }

    /// Parse a body as JSON, substituting an error object with a raw snippet
    pub fn from_body(text: &str, elapsed: Duration, status_code: u16) -> Self {
        let body = serde_json::from_str(text).unwrap_or_else(|_| {
            json!({
                "error": INVALID_JSON_MESSAGE,
                "raw": truncate_chars(text, RAW_SNIPPET_LIMIT),
            })
        });

        Self { body, elapsed, status_code }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }
}

/// First `limit` characters of `text`
pub fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}

/// Build the header set sent with every request
pub fn default_headers(api_key: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    let key = HeaderValue::from_str(api_key)
        .map_err(|e| AppError::config(format!("API key is not a valid header value: {}", e)))?;
    headers.insert(HeaderName::from_static("x-api-key"), key);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    Ok(headers)
}

/// Integration API client backed by reqwest
pub struct ApiClient {
    client: Client,
    timeout: Duration,
}

impl ApiClient {
    /// Create a client that sends the API key headers with every request
    pub fn new(api_key: &str, request_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(request_timeout)
            .default_headers(default_headers(api_key)?)
            .user_agent(format!("{}/{}", crate::PKG_NAME, crate::VERSION))
            .build()
            .map_err(|e| AppError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            timeout: request_timeout,
        })
    }

    /// Create a client from the application configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.api_key, config.timeout())
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Send the request and read the full body
    async fn fetch(&self, url: &Url) -> std::result::Result<(u16, String), reqwest::Error> {
        let response = self.client.get(url.clone()).send().await?;
        let status_code = response.status().as_u16();
        let text = response.text().await?;
        Ok((status_code, text))
    }
}

#[async_trait]
impl HttpClient for ApiClient {
    async fn get_json(&self, url: &Url) -> ApiResponse {
        let start_time = Instant::now();

        match timeout(self.timeout, self.fetch(url)).await {
            Ok(Ok((status_code, text))) => ApiResponse::from_body(&text, start_time.elapsed(), status_code),
            Ok(Err(e)) if e.is_timeout() => ApiResponse::timed_out(start_time.elapsed()),
            Ok(Err(e)) => ApiResponse::network_failure(describe_error(&e), start_time.elapsed()),
            Err(_) => ApiResponse::timed_out(start_time.elapsed()),
        }
    }
}

/// Error text including the underlying cause chain
fn describe_error(error: &reqwest::Error) -> String {
    use std::error::Error as _;

    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
