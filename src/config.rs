use std::env;
use std::fmt;

use thiserror::Error;

/// Longest message, in characters after trimming, that the widget or the relay will accept.
pub const MAX_MESSAGE_CHARS: usize = 285;

pub const UPSTREAM_URL_VAR: &str = "UPSTREAM_API_URL";
pub const SECRET_KEY_VAR: &str = "UPSTREAM_API_KEY";

// Names used by earlier deployments of the relay
const LEGACY_UPSTREAM_URL_VAR: &str = "AWS_API_GATEWAY_URL";
const LEGACY_SECRET_KEY_VAR: &str = "AWS_API_KEY";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("upstream URL is not configured (set {var})", var = UPSTREAM_URL_VAR)]
    MissingUpstreamUrl,
    #[error("upstream secret key is not configured (set {var})", var = SECRET_KEY_VAR)]
    MissingSecretKey,
}

/// Secret sent to the upstream service. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(String);

impl SecretKey {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub upstream_url: String,
    pub secret_key: SecretKey,
}

impl RelayConfig {
    /// Builds a config from raw values. Blank values count as missing.
    pub fn new(
        upstream_url: Option<String>,
        secret_key: Option<String>,
    ) -> Result<Self, ConfigError> {
        let upstream_url = non_blank(upstream_url).ok_or(ConfigError::MissingUpstreamUrl)?;
        let secret_key = non_blank(secret_key).ok_or(ConfigError::MissingSecretKey)?;

        Ok(Self {
            upstream_url,
            secret_key: SecretKey(secret_key),
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(
            read_var(UPSTREAM_URL_VAR, LEGACY_UPSTREAM_URL_VAR),
            read_var(SECRET_KEY_VAR, LEGACY_SECRET_KEY_VAR),
        )
    }
}

fn read_var(primary: &str, legacy: &str) -> Option<String> {
    non_blank(env::var(primary).ok()).or_else(|| non_blank(env::var(legacy).ok()))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_values_required() {
        assert_eq!(
            RelayConfig::new(None, Some("k".into())).unwrap_err(),
            ConfigError::MissingUpstreamUrl
        );
        assert_eq!(
            RelayConfig::new(Some("http://up".into()), None).unwrap_err(),
            ConfigError::MissingSecretKey
        );
        assert_eq!(
            RelayConfig::new(Some("http://up".into()), Some("   ".into())).unwrap_err(),
            ConfigError::MissingSecretKey
        );
    }

    #[test]
    fn debug_output_hides_secret() {
        let config = RelayConfig::new(Some("http://up".into()), Some("hunter2".into())).unwrap();
        let printed = format!("{:?}", config);
        assert!(printed.contains("http://up"));
        assert!(!printed.contains("hunter2"));
        assert_eq!(config.secret_key.expose(), "hunter2");
    }
}
