use chrono::{SecondsFormat, Utc};
use log::{debug, error};
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

use crate::web::models::RelayRequest;

/// Shown as the bot reply when the relay answers without a usable text field.
pub const NO_RESPONSE_TEXT: &str = "No response received.";

#[derive(Debug, Error)]
pub enum RelayCallError {
    #[error("relay unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP error! status: {0}")]
    Status(u16),
}

/// One outbound call to the relay, returning the reply text.
#[allow(async_fn_in_trait)]
pub trait RelayTransport {
    async fn send(&self, message: &str) -> Result<String, RelayCallError>;
}

/// Posts to the relay endpoint over HTTP. No timeout is set.
pub struct HttpRelay {
    endpoint: String,
    client: Client,
}

impl HttpRelay {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl RelayTransport for HttpRelay {
    async fn send(&self, message: &str) -> Result<String, RelayCallError> {
        debug!("Calling relay: {}", self.endpoint);

        let payload = RelayRequest {
            message: message.to_string(),
            timestamp: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        };

        let response = self.client.post(&self.endpoint).json(&payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            let details = response.text().await.unwrap_or_default();
            error!("Relay error - status: {}, details: {}", status, details);
            return Err(RelayCallError::Status(status.as_u16()));
        }

        let body: Value = response.json().await?;
        debug!("Relay response received");

        Ok(reply_text(&body))
    }
}

/// Picks the text to show from a successful relay body.
pub fn reply_text(body: &Value) -> String {
    ["response", "message"]
        .iter()
        .filter_map(|field| body.get(field).and_then(Value::as_str))
        .find(|text| !text.is_empty())
        .unwrap_or(NO_RESPONSE_TEXT)
        .to_string()
}
