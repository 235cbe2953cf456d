//! Product API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::{Value, json};

use crate::api::JsonBody;
use crate::core::ServerState;
use crate::db::repository::Repository;
use crate::utils::{AppError, AppResult, ErrorCode, run_blocking};
use shared::models::{Product, ProductCreate, ProductUpdate};

fn not_found(id: &str) -> AppError {
    AppError::with_message(
        ErrorCode::ProductNotFound,
        format!("Producto no encontrado: {}", id),
    )
}

/// GET /api/products
pub async fn list(State(state): State<ServerState>) -> Json<Vec<Product>> {
    Json(state.products().find_all())
}

/// GET /api/products/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    state
        .products()
        .find_by_id(&id)
        .map(Json)
        .ok_or_else(|| not_found(&id))
}

/// POST /api/products (admin)
pub async fn create(
    State(state): State<ServerState>,
    JsonBody(payload): JsonBody<ProductCreate>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let repo = state.products();
    let product = run_blocking(move || repo.create(payload)).await??;
    tracing::info!(product_id = %product.id, precio = product.precio, "product.created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /api/products/:id (admin)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<ProductUpdate>,
) -> AppResult<Json<Product>> {
    let repo = state.products();
    let product = run_blocking(move || repo.update(&id, payload)).await??;
    tracing::info!(product_id = %product.id, stock = product.stock, "product.updated");
    Ok(Json(product))
}

/// DELETE /api/products/:id (admin)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    let repo = state.products();
    let key = id.clone();
    if !run_blocking(move || repo.delete(&key)).await?? {
        return Err(not_found(&id));
    }
    tracing::info!(product_id = %id, "product.deleted");
    Ok(Json(json!({ "ok": true })))
}
