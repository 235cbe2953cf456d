//! Wire models shared by the storefront server and its clients
//!
//! Field names follow the JSON documents the storefront has always used
//! (`nombre`, `precio`, `fechaCreacion`, ...), so existing data files load
//! unchanged.

pub mod cart;
pub mod order;
pub mod product;

pub use cart::{CartCalculation, CartItemInput, CartLine};
pub use order::{Order, OrderItem, OrderState, PaymentStatus};
pub use product::{Product, ProductCreate, ProductUpdate};
