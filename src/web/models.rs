use serde::{Deserialize, Serialize};

/// Body the widget posts to the relay.
#[derive(Debug, Serialize, Deserialize)]
pub struct RelayRequest {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Body the relay posts upstream. The client timestamp is not forwarded.
#[derive(Debug, Serialize)]
pub struct UpstreamRequest<'a> {
    pub message: &'a str,
}
