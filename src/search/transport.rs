//! Transport to the search API
//!
//! `Transport` is the seam between the search coordinator and the network.
//! `HttpTransport` is the reqwest implementation used in production.

use crate::error::{Error, Result};
use std::time::Duration;
use tracing::debug;

/// Trait for posting JSON to the search API
pub trait Transport: Send + Sync {
    /// POST a JSON body and return the decoded JSON reply
    ///
    /// Network failures and non-success statuses are `Error::Transport`;
    /// a reply that is not JSON is `Error::MalformedResponse`.
    fn post(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> impl std::future::Future<Output = Result<serde_json::Value>> + Send;
}

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with a per-request timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    async fn post(&self, url: &str, body: &serde_json::Value) -> Result<serde_json::Value> {
        debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::Transport(format!("Search request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Transport(format!(
                "Search API returned status: {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::MalformedResponse(format!("Failed to decode search response: {}", e)))
    }
}
