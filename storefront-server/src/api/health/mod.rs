//! Health check routes
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/health | GET | none |
//! | /api/version | GET | none |

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;
use crate::utils::time::now_millis;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/version", get(version))
}

#[derive(Serialize)]
pub struct HealthResponse {
    ok: bool,
    /// Unix millis
    time: i64,
}

#[derive(Serialize)]
pub struct VersionResponse {
    service: &'static str,
    version: &'static str,
    pid: u32,
    port: u16,
    time: i64,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        time: now_millis(),
    })
}

pub async fn version(State(state): State<ServerState>) -> Json<VersionResponse> {
    Json(VersionResponse {
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        pid: std::process::id(),
        port: state.config.http_port,
        time: now_millis(),
    })
}
