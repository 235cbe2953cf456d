//! Admin bearer middleware
//!
//! Applied to the whole router; requests that are not admin routes pass
//! through untouched.
//!
//! # Admin routes
//!
//! | Method | Path |
//! |--------|------|
//! | POST / PUT / DELETE | `/api/products...` |
//! | PATCH / DELETE | `/api/orders/{id}...` |
//!
//! # Errors
//!
//! | Error | HTTP status |
//! |-------|-------------|
//! | no `Authorization: Bearer` header | 401 NotAuthenticated |
//! | wrong token | 401 TokenInvalid |

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::Method;

use crate::core::ServerState;
use crate::utils::AppError;

/// Whether `method path` needs the admin token
pub fn is_admin_route(method: &Method, path: &str) -> bool {
    if path == "/api/products" || path.starts_with("/api/products/") {
        return matches!(*method, Method::POST | Method::PUT | Method::DELETE);
    }
    if path.starts_with("/api/orders/") {
        return matches!(*method, Method::PATCH | Method::DELETE);
    }
    false
}

pub async fn require_admin(
    State(state): State<ServerState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !is_admin_route(req.method(), req.uri().path()) {
        return Ok(next.run(req).await);
    }

    let token = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim);

    match token {
        None => {
            tracing::warn!(method = %req.method(), uri = %req.uri(), "admin token missing");
            Err(AppError::not_authenticated())
        }
        Some(token) if token == state.config.admin_token => Ok(next.run(req).await),
        Some(_) => {
            tracing::warn!(method = %req.method(), uri = %req.uri(), "admin token rejected");
            Err(AppError::invalid_token())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_routes() {
        assert!(is_admin_route(&Method::POST, "/api/products"));
        assert!(is_admin_route(&Method::PUT, "/api/products/burger"));
        assert!(is_admin_route(&Method::DELETE, "/api/products/burger"));
        assert!(is_admin_route(&Method::PATCH, "/api/orders/abc/state"));
        assert!(is_admin_route(&Method::DELETE, "/api/orders/abc"));
    }

    #[test]
    fn test_public_routes() {
        assert!(!is_admin_route(&Method::GET, "/api/products"));
        assert!(!is_admin_route(&Method::GET, "/api/products/burger"));
        assert!(!is_admin_route(&Method::POST, "/api/orders"));
        assert!(!is_admin_route(&Method::GET, "/api/orders/abc"));
        assert!(!is_admin_route(&Method::POST, "/api/cart/calculate"));
        assert!(!is_admin_route(&Method::POST, "/webhooks/mercadopago"));
        assert!(!is_admin_route(&Method::POST, "/api/productsx"));
    }
}
