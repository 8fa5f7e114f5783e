//! Gerrit REST client.
//!
//! Production [`RestTransport`] backed by reqwest, plus endpoint URL
//! assembly and the response-framing helpers every caller needs.

use crate::error::Error;
use crate::services::transport::{Method, RestResponse, RestTransport};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::{header, Client};
use serde::de::DeserializeOwned;

/// Prefix Gerrit prepends to every JSON response to defeat cross-site
/// script inclusion. Must be stripped before parsing.
pub const XSSI_PREFIX: &str = ")]}'";

/// Strip the anti-hijacking prefix from a response body, if present.
pub fn strip_xssi_prefix(body: &str) -> &str {
    body.strip_prefix(XSSI_PREFIX).unwrap_or(body)
}

/// Parse a prefixed-JSON response body into a typed value.
pub fn decode_prefixed_json<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    serde_json::from_str(strip_xssi_prefix(body))
        .map_err(|e| Error::decode(format!("Malformed response body: {}", e)))
}

/// Gerrit client configuration.
#[derive(Debug, Clone)]
pub struct GerritClientConfig {
    /// Base URL of the Gerrit instance (e.g. `https://gerrit.example.com`).
    pub base_url: String,

    /// HTTP Basic username. When absent, requests ride on whatever session
    /// the transport layer already carries.
    pub username: Option<String>,

    /// HTTP password matching `username`.
    pub password: Option<String>,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GerritClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            username: None,
            password: None,
            timeout_secs: 30,
        }
    }
}

/// Builds absolute URLs for the authenticated changes API.
#[derive(Debug, Clone)]
pub struct GerritEndpoints {
    base_url: String,
}

impl GerritEndpoints {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `POST` target for reviewing the current revision of a change.
    pub fn review(&self, change_id: &str) -> String {
        format!(
            "{}/a/changes/{}/revisions/current/review",
            self.base_url,
            urlencoding::encode(change_id)
        )
    }

    /// `POST` target for cherry-picking the current revision of a change.
    pub fn cherry_pick(&self, change_id: &str) -> String {
        format!(
            "{}/a/changes/{}/revisions/current/cherrypick",
            self.base_url,
            urlencoding::encode(change_id)
        )
    }
}

/// Gerrit REST API client.
#[derive(Debug, Clone)]
pub struct GerritClient {
    client: Client,
    config: GerritClientConfig,
}

impl GerritClient {
    /// Create a new Gerrit client.
    pub fn new(config: GerritClientConfig) -> Result<Self, Error> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            let credentials = BASE64.encode(format!("{}:{}", username, password));
            let value = header::HeaderValue::from_str(&format!("Basic {}", credentials))
                .map_err(|_| Error::invalid_input_field("Invalid credentials", "username"))?;
            headers.insert(header::AUTHORIZATION, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Endpoint builder for this client's instance.
    pub fn endpoints(&self) -> GerritEndpoints {
        GerritEndpoints::new(&self.config.base_url)
    }
}

#[async_trait]
impl RestTransport for GerritClient {
    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<String>,
    ) -> Result<RestResponse, Error> {
        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| Error::network(format!("Failed to read response body: {}", e)))?;

        Ok(RestResponse { status, body })
    }
}
