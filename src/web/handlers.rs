use actix_web::{http::Method, web, HttpRequest, HttpResponse, Responder};
use log::{debug, error, info, warn};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::config::MAX_MESSAGE_CHARS;
use crate::error::RelayError;
use crate::web::RelayState;

/// Largest relay body read. A body this big cannot hold a message within
/// the character limit, so anything past it is answered as too long.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

// Health check endpoint
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

// Chat relay endpoint. Every method lands here so preflight and rejection
// are answered by the same handler that relays POSTs.
pub async fn chat_relay(
    req: HttpRequest,
    payload: web::Payload,
    state: web::Data<RelayState>,
) -> Result<HttpResponse, RelayError> {
    match *req.method() {
        Method::POST => {}
        Method::OPTIONS => return Ok(HttpResponse::Ok().finish()),
        ref other => {
            warn!("Rejected {} request to relay", other);
            return Err(RelayError::MethodNotAllowed);
        }
    }

    let body = payload
        .to_bytes_limited(MAX_BODY_BYTES)
        .await
        .map_err(|_| RelayError::MessageTooLong)?
        .map_err(|e| {
            debug!("Failed to read relay body: {}", e);
            RelayError::InvalidJson
        })?;

    let request_id = Uuid::new_v4();
    let message = extract_message(&body)?;
    info!(
        "Relay request {}: {} characters",
        request_id,
        message.chars().count()
    );

    let upstream = state.upstream().map_err(|e| {
        error!("Relay request {} not forwarded: {}", request_id, e);
        RelayError::from(e.clone())
    })?;

    let reply = upstream.forward(&message).await.map_err(|e| {
        error!("Relay request {} failed: {:#}", request_id, e);
        RelayError::Transport(format!("{:#}", e))
    })?;

    if !reply.is_success() {
        error!(
            "Relay request {}: upstream error status {}",
            request_id, reply.status
        );
        return Err(RelayError::Upstream {
            status: reply.status,
            details: reply.body,
        });
    }

    info!("Relay request {}: upstream status {}", request_id, reply.status);
    Ok(HttpResponse::Ok().json(reply.body))
}

/// Pulls the trimmed `message` out of a relay body and checks its length.
fn extract_message(body: &[u8]) -> Result<String, RelayError> {
    let payload: Value = serde_json::from_slice(body).map_err(|e| {
        debug!("Relay body is not JSON: {}", e);
        RelayError::InvalidJson
    })?;

    if let Some(timestamp) = payload.get("timestamp").and_then(Value::as_str) {
        debug!("Client timestamp: {}", timestamp);
    }

    let message = payload
        .get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .ok_or(RelayError::MessageRequired)?;

    if message.chars().count() > MAX_MESSAGE_CHARS {
        return Err(RelayError::MessageTooLong);
    }

    Ok(message.to_string())
}
