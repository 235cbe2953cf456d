//! Provider webhooks
//!
//! POST /webhooks/mercadopago - handled by the preference provider
//! POST /webhooks/vexor       - handled by the session provider
//!
//! Raw bodies are read as bytes so that empty or oddly typed requests can be
//! acknowledged instead of rejected by the JSON extractor.

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/webhooks/mercadopago", post(handler::mercadopago))
        .route("/webhooks/vexor", post(handler::vexor))
}
