//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::api::JsonBody;
use crate::core::ServerState;
use crate::utils::{AppResult, run_blocking};
use shared::models::{CartItemInput, Order};

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub cliente: Option<String>,
    #[serde(default)]
    pub items: Vec<CartItemInput>,
}

#[derive(Debug, Deserialize)]
pub struct ChangeStateRequest {
    #[serde(default)]
    pub estado: String,
}

/// GET /api/orders
pub async fn list(State(state): State<ServerState>) -> Json<Vec<Order>> {
    Json(state.order_repo().find_all())
}

/// GET /api/orders/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    Ok(Json(state.orders.get_order(&id)?))
}

/// POST /api/orders - reserve stock and create the order
pub async fn create(
    State(state): State<ServerState>,
    JsonBody(payload): JsonBody<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<Order>)> {
    let cliente = payload.cliente.unwrap_or_default();
    let orders = state.orders.clone();
    let order = run_blocking(move || orders.create_order(&cliente, &payload.items)).await??;
    Ok((StatusCode::CREATED, Json(order)))
}

/// PATCH /api/orders/:id/state (admin)
pub async fn change_state(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<ChangeStateRequest>,
) -> AppResult<Json<Order>> {
    let orders = state.orders.clone();
    let order = run_blocking(move || orders.change_order_state(&id, &payload.estado)).await??;
    Ok(Json(order))
}

/// DELETE /api/orders/:id (admin) - stock is not restored
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    let orders = state.orders.clone();
    run_blocking(move || orders.delete_order(&id)).await??;
    Ok(Json(json!({ "ok": true })))
}
