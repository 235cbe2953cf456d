//! Storefront server - catalog, orders and payments for a small food shop
//!
//! # Modules
//!
//! - **core** (`core`): configuration, shared state, HTTP server
//! - **storage** (`db`): `products.json` / `orders.json` behind one lock
//! - **orders** (`orders`): order lifecycle, stock reservation and restock
//! - **payments** (`payments`): Simulated, MercadoPago and Vexor providers
//! - **auth** (`auth`): admin bearer token
//! - **HTTP API** (`api`): axum routers and handlers
//!
//! ```text
//! storefront-server/src/
//! ├── core/          # config, state, server, errors
//! ├── db/            # JSON store + repositories
//! ├── orders/        # OrdersManager, cart validation, money
//! ├── payments/      # provider adapter
//! ├── auth/          # admin middleware
//! ├── api/           # routes and handlers
//! └── utils/         # logger, ids, time
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod payments;
pub mod utils;

pub use core::{Config, Server, ServerState};
pub use orders::OrdersManager;
pub use utils::{AppError, AppResult, ErrorCategory, ErrorCode};

pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env`, read the configuration and start logging
pub fn setup_environment() -> core::Result<Config> {
    let _ = dotenv::dotenv();
    let config = Config::from_env()?;
    init_logger_with_file(
        Some(&config.log_level),
        config.log_json,
        config.log_dir.as_deref(),
    );
    Ok(config)
}
