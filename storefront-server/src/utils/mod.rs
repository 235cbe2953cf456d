//! Utility module
//!
//! - [`AppError`] / [`AppResult`] (re-exported from `shared::error`)
//! - logging setup, id generation, time helpers
//! - [`run_blocking`] for store writes from async handlers

pub mod blocking;
pub mod id;
pub mod logger;
pub mod time;

pub use blocking::run_blocking;
pub use shared::error::{AppError, AppResult, ErrorBody, ErrorCategory, ErrorCode};
