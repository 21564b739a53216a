// API client module: a small blocking HTTP client for the chains' public
// REST endpoints. One GET per query, fully awaited before the next prompt.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde_json::Value;
use tracing::debug;

use crate::error::QueryError;

/// Compiled-in client settings.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            timeout: Duration::from_secs(30),
        }
    }
}

/// Holds a reqwest blocking client with the fixed timeout and
/// `Accept: application/json` header applied to every request.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
}

impl ApiClient {
    pub fn new() -> Result<Self> {
        Self::with_config(&ClientConfig::default())
    }

    pub fn with_config(config: &ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ApiClient { client })
    }

    /// GET `{base_url}{path}` and decode the body as JSON.
    pub fn fetch(&self, base_url: &str, path: &str) -> Result<Value, QueryError> {
        let url = join_url(base_url, path);
        debug!(%url, "GET");
        let res = self.client.get(&url).send().map_err(QueryError::Network)?;
        let status = res.status();
        debug!(%url, %status, "response");
        if !status.is_success() {
            let body = res.text().unwrap_or_default();
            return Err(QueryError::HttpStatus { url, status, body });
        }
        let body = res.text().map_err(QueryError::Network)?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Exactly one `/` between origin and path, whatever either side carries.
pub fn join_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}
