//! Shared types for the storefront
//!
//! Wire models (products, orders, cart) and the unified error system used by
//! the server and by anything that talks to its HTTP API.

pub mod error;
pub mod models;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCode};
