//! Blocking work off the async workers
//!
//! Store writes fsync and rename files while holding the store lock; handlers
//! run them on tokio's blocking pool.

use super::{AppError, AppResult};

/// Run `f` on the blocking pool
///
/// The outer result only fails when the task itself panicked or was
/// cancelled; the closure's own result is returned as-is.
pub async fn run_blocking<F, R>(f: F) -> AppResult<R>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| {
        tracing::error!("spawn_blocking join error: {e}");
        AppError::internal("Internal error")
    })
}
