//! Admin authentication
//!
//! A single configured token (`ADMIN_TOKEN`) guards catalog writes and order
//! administration. See [`middleware::require_admin`].

pub mod middleware;

pub use middleware::{is_admin_route, require_admin};
