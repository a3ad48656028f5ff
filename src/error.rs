//! Errors the relay turns into HTTP responses.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::{json, Value};
use thiserror::Error;

use crate::config::{ConfigError, MAX_MESSAGE_CHARS};

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Invalid JSON in request body")]
    InvalidJson,

    #[error("Message is required")]
    MessageRequired,

    #[error("Message too long. Maximum {max} characters allowed.", max = MAX_MESSAGE_CHARS)]
    MessageTooLong,

    #[error("Server configuration error")]
    Configuration(#[from] ConfigError),

    #[error("Failed to process request")]
    Upstream { status: u16, details: Value },

    #[error("Internal server error")]
    Transport(String),
}

impl ResponseError for RelayError {
    fn status_code(&self) -> StatusCode {
        match self {
            RelayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            RelayError::InvalidJson | RelayError::MessageRequired | RelayError::MessageTooLong => {
                StatusCode::BAD_REQUEST
            }
            RelayError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            RelayError::Configuration(_) | RelayError::Transport(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            RelayError::Upstream { details, .. } => json!({
                "error": self.to_string(),
                "details": details,
            }),
            RelayError::Transport(message) => json!({
                "error": self.to_string(),
                "message": message,
            }),
            _ => json!({ "error": self.to_string() }),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_errors_are_bad_requests() {
        assert_eq!(RelayError::InvalidJson.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(RelayError::MessageRequired.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(RelayError::MessageTooLong.status_code(), StatusCode::BAD_REQUEST);
        assert!(RelayError::MessageTooLong.to_string().contains("285"));
    }

    #[test]
    fn upstream_status_is_kept() {
        let err = RelayError::Upstream {
            status: 429,
            details: json!({ "message": "slow down" }),
        };
        assert_eq!(err.status_code(), StatusCode::TOO_MANY_REQUESTS);

        let err = RelayError::Upstream {
            status: 42,
            details: Value::Null,
        };
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn configuration_error_hides_detail() {
        let err = RelayError::from(ConfigError::MissingSecretKey);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Server configuration error");
    }
}
