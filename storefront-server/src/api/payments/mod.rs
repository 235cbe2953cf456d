//! Payment routes
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /api/payments/config | GET | active provider and public settings |
//! | /api/payments/preference | POST | MercadoPago preference (or simulated) |
//! | /api/payments/vexor/session | POST | Vexor session (or simulated) |
//! | /api/payments/vexor/simulate | GET | simulated result, redirects to the storefront |
//! | /pago/simulado/{orderId} | GET | local checkout page |
//! | /pago/vexor/{orderId} | GET | same page |

mod handler;
mod page;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/payments", payment_routes())
        .route("/pago/simulado/{order_id}", get(handler::checkout_page))
        .route("/pago/vexor/{order_id}", get(handler::checkout_page))
}

fn payment_routes() -> Router<ServerState> {
    Router::new()
        .route("/config", get(handler::config))
        .route("/preference", post(handler::create_preference))
        .route("/vexor/session", post(handler::create_session))
        .route("/vexor/simulate", get(handler::simulate))
}
