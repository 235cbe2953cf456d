//! Order lifecycle
//!
//! - **manager**: `OrdersManager`, order creation, state changes, checkout and
//!   payment notifications
//! - **cart**: line validation shared by the cart pre-check and order creation
//! - **money**: decimal arithmetic for totals
//!
//! # Data Flow
//!
//! ```text
//! cart/calculate ─► validate_lines (read)
//! POST /orders  ─► validate_lines + reserve stock (write)
//! checkout      ─► PaymentProvider::create_session
//! webhook       ─► process_payment_notification (write, idempotent restock)
//! ```

pub mod cart;
pub mod manager;
pub mod money;

pub use manager::{
    CheckoutOutcome, NotificationOutcome, OrderError, OrderResult, OrdersManager, PaymentTarget,
};
