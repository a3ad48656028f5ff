pub mod handlers;
pub mod models;
pub mod routes;

use crate::config::{ConfigError, RelayConfig};
use crate::upstream::UpstreamClient;

/// Shared, read-only state behind the relay endpoint.
pub struct RelayState {
    upstream: Result<UpstreamClient, ConfigError>,
}

impl RelayState {
    /// A state built from a failed config still serves requests; each one
    /// that passes validation is answered with a configuration error.
    pub fn new(config: Result<RelayConfig, ConfigError>) -> Self {
        Self {
            upstream: config.map(UpstreamClient::new),
        }
    }

    pub fn upstream(&self) -> Result<&UpstreamClient, &ConfigError> {
        self.upstream.as_ref()
    }
}
