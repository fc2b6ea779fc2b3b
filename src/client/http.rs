//! HTTP retrieval
//!
//! Thin wrapper over a reqwest [`Client`] that tags failures with the
//! resource being fetched so they map to the right exit status.

use reqwest::{Client, Response};
use std::time::Duration;

use crate::config::Config;
use crate::errors::{IcdError, Resource, Result};

#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

/// Build the shared HTTP client from config
pub fn build_client(config: &Config) -> Result<Client> {
    let client = Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

impl Fetcher {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: build_client(config)?,
        })
    }

    /// GET `url`, failing on transport errors and non-success statuses
    pub async fn get(&self, url: &str, resource: Resource) -> Result<Response> {
        tracing::debug!(url, %resource, "GET");
        self.client
            .get(url)
            .send()
            .await
            .and_then(Response::error_for_status)
            .map_err(|e| IcdError::fetch(resource, e))
    }

    /// Fetch a page as text
    pub async fn get_text(&self, url: &str, resource: Resource) -> Result<String> {
        let response = self.get(url, resource).await?;
        response.text().await.map_err(|e| IcdError::fetch(resource, e))
    }
}
