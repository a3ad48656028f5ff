use actix_web::{middleware::DefaultHeaders, web};
use crate::web::handlers;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/chat-relay", web::route().to(handlers::chat_relay))
        .route("/health", web::get().to(handlers::health_check));
}

// Any origin may call the relay; applied to every response, errors included.
pub fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", "*"))
        .add(("Access-Control-Allow-Headers", "Content-Type"))
        .add(("Access-Control-Allow-Methods", "POST, OPTIONS"))
}
