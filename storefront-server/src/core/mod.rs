//! Core module: configuration, shared state, HTTP server
//!
//! # Structure
//!
//! - [`Config`] - server configuration
//! - [`ServerState`] - state shared by every handler
//! - [`Server`] - HTTP server
//! - [`ServerError`] - startup errors

pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use config::{BackUrls, Config, PaymentConfig, VexorConfig};
pub use error::{Result, ServerError};
pub use server::Server;
pub use state::ServerState;
