//! HTTP API
//!
//! | Module | Prefix |
//! |--------|--------|
//! | health | `/api/health`, `/api/version` |
//! | products | `/api/products` |
//! | orders | `/api/orders` |
//! | cart | `/api/cart` |
//! | stats | `/api/stats` |
//! | payments | `/api/payments`, `/pago` |
//! | webhooks | `/webhooks` |
//!
//! Admin routes are guarded by [`crate::auth::require_admin`], applied once
//! over the whole router.

pub mod cart;
pub mod extractor;
pub mod health;
pub mod orders;
pub mod payments;
pub mod products;
pub mod stats;
pub mod webhooks;

use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::require_admin;
use crate::core::ServerState;

pub use crate::utils::{AppError, AppResult};
pub use extractor::JsonBody;

/// All routes, without state
pub fn build_app() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(products::router())
        .merge(orders::router())
        .merge(cart::router())
        .merge(stats::router())
        .merge(payments::router())
        .merge(webhooks::router())
}

/// Complete application router
pub fn create_router(state: ServerState) -> Router {
    build_app()
        .layer(middleware::from_fn_with_state(state.clone(), require_admin))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
