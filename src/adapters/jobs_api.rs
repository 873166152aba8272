//! Recruiting API client
//!
//! Thin authenticated JSON client for the upstream job board. Every call is
//! a single live request: no caching, no retries, no deadline of its own.

use crate::config::{bearer_header, ApiConfig};
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CACHE_CONTROL, CONTENT_TYPE,
};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

/// Credential sent when no token is configured. Upstream will normally
/// reject it, which surfaces as an ordinary upstream error.
pub const PLACEHOLDER_TOKEN: &str = "YOUR_API_TOKEN";

/// Method, extra headers and optional JSON body for one request
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::get()
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self {
            method: Method::GET,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// POST with `body` serialized as JSON
    pub fn post_json<B: Serialize>(body: &B) -> Result<Self> {
        Ok(Self {
            method: Method::POST,
            headers: HeaderMap::new(),
            body: Some(serde_json::to_value(body)?),
        })
    }

    /// Add a header that replaces any default of the same name
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Transport seam between the services and the upstream API
#[async_trait]
pub trait UpstreamApi: Send + Sync {
    /// Execute a request against `path` (relative to the base URL) and
    /// return the parsed JSON body of a successful response
    async fn send(&self, path: &str, options: RequestOptions) -> Result<Value>;
}

/// Execute a request and deserialize the body into `T`.
///
/// The type is a contract with upstream, not a schema check; the model types
/// default missing fields rather than rejecting them.
pub async fn request<T: DeserializeOwned>(
    api: &dyn UpstreamApi,
    path: &str,
    options: RequestOptions,
) -> Result<T> {
    let value = api.send(path, options).await?;
    Ok(serde_json::from_value(value)?)
}

/// reqwest-backed client for the recruiting API
pub struct ApiClient {
    client: Client,
    config: ApiConfig,
}

impl ApiClient {
    /// Create a new client with its own connection pool
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client, config))
    }

    /// Create a new client with an existing reqwest client
    pub fn with_client(client: Client, config: ApiConfig) -> Self {
        if config.api_token.is_none() {
            warn!("No API token configured, sending placeholder credential");
        }
        Self { client, config }
    }

    /// Absolute URL for a path relative to the base URL
    pub fn url(&self, path: &str) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }

    /// Default headers merged with the caller's; the caller wins on conflict
    pub fn build_headers(&self, overrides: &HeaderMap) -> Result<HeaderMap> {
        let token = self.config.api_token.as_deref().unwrap_or(PLACEHOLDER_TOKEN);
        let bearer = bearer_header(token)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
        headers.extend(overrides.clone());

        Ok(headers)
    }
}

#[async_trait]
impl UpstreamApi for ApiClient {
    async fn send(&self, path: &str, options: RequestOptions) -> Result<Value> {
        let url = self.url(path);
        let headers = self.build_headers(&options.headers)?;

        debug!("{} {}", options.method, path);

        let mut req = self.client.request(options.method, &url).headers(headers);
        if let Some(body) = &options.body {
            req = req.body(serde_json::to_vec(body)?);
        }

        let resp = req.send().await?;
        let status = resp.status();

        if !status.is_success() {
            let body = match resp.text().await {
                Ok(text) if !text.trim().is_empty() => text,
                _ => status_line(status),
            };
            warn!("Upstream request to {} failed with status {}", path, status);
            return Err(Error::Upstream { status, body });
        }

        let text = resp.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&text)?)
    }
}

fn status_line(status: StatusCode) -> String {
    status.to_string()
}
