//! Cart pre-check
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/cart/calculate | POST | none |

use axum::{Json, Router, extract::State, routing::post};
use serde::Deserialize;

use crate::api::JsonBody;
use crate::core::ServerState;
use crate::utils::AppResult;
use shared::models::{CartCalculation, CartItemInput};

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/cart/calculate", post(calculate))
}

#[derive(Debug, Deserialize)]
pub struct CalculateRequest {
    #[serde(default)]
    pub items: Vec<CartItemInput>,
}

/// Validate a cart without touching stock
pub async fn calculate(
    State(state): State<ServerState>,
    JsonBody(payload): JsonBody<CalculateRequest>,
) -> AppResult<Json<CartCalculation>> {
    Ok(Json(state.orders.calculate_cart(&payload.items)?))
}
