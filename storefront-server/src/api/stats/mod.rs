//! Order statistics

use axum::{Json, Router, extract::State, routing::get};

use crate::core::ServerState;
use crate::db::repository::order::OrderStats;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/stats", get(stats))
}

/// GET /api/stats
pub async fn stats(State(state): State<ServerState>) -> Json<OrderStats> {
    Json(state.order_repo().stats())
}
