use anyhow::{Context, Result};
use log::{debug, info};
use reqwest::Client;
use serde_json::Value;

use crate::config::RelayConfig;
use crate::web::models::UpstreamRequest;

/// Header carrying the secret key on every upstream call.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// What the upstream answered: its status and its JSON body.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: Value,
}

impl UpstreamReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// Thin wrapper around the safety-assessment API
pub struct UpstreamClient {
    config: RelayConfig,
    client: Client,
}

impl UpstreamClient {
    pub fn new(config: RelayConfig) -> Self {
        info!("Using upstream service at: {}", config.upstream_url);

        Self {
            config,
            client: Client::new(),
        }
    }

    /// Posts one message upstream. There is no timeout and no retry; the
    /// call lasts as long as the upstream takes to answer.
    pub async fn forward(&self, message: &str) -> Result<UpstreamReply> {
        let payload = UpstreamRequest { message };

        let response = self
            .client
            .post(&self.config.upstream_url)
            .header(API_KEY_HEADER, self.config.secret_key.expose())
            .json(&payload)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body: Value = response
            .json()
            .await
            .with_context(|| format!("upstream returned a non-JSON body (status {})", status))?;
        debug!("Upstream JSON: {}", body);

        Ok(UpstreamReply { status, body })
    }
}
