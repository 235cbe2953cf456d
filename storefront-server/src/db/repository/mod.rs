//! Repository Module
//!
//! CRUD access to the JSON documents. Order mutations that touch stock do not
//! go through here; they belong to the `OrdersManager`, which needs both
//! documents inside one write.

pub mod order;
pub mod product;

pub use order::OrderRepository;
pub use product::ProductRepository;

use super::StorageError;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Invalid stock: {0}")]
    InvalidStock(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(id) => AppError::with_message(
                ErrorCode::ProductNotFound,
                format!("Producto no encontrado: {}", id),
            ),
            RepoError::Duplicate(id) => AppError::with_message(
                ErrorCode::ProductIdExists,
                format!("Ya existe un producto con id {}", id),
            ),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::InvalidPrice(msg) => {
                AppError::with_message(ErrorCode::ProductInvalidPrice, msg)
            }
            RepoError::InvalidStock(msg) => {
                AppError::with_message(ErrorCode::ProductInvalidStock, msg)
            }
            RepoError::Storage(e) => AppError::storage(e.to_string()),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Common repository trait for basic CRUD
pub trait Repository<T, CreateDto, UpdateDto> {
    fn find_all(&self) -> Vec<T>;
    fn find_by_id(&self, id: &str) -> Option<T>;
    fn create(&self, data: CreateDto) -> RepoResult<T>;
    fn update(&self, id: &str, data: UpdateDto) -> RepoResult<T>;
    fn delete(&self, id: &str) -> RepoResult<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    #[test]
    fn test_product_value_errors_keep_their_codes() {
        let err: AppError = RepoError::InvalidPrice("precio must be a positive number".into()).into();
        assert_eq!(err.code, ErrorCode::ProductInvalidPrice);
        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);

        let err: AppError = RepoError::InvalidStock("stock must be non-negative, got -1".into()).into();
        assert_eq!(err.code, ErrorCode::ProductInvalidStock);
        assert_eq!(err.message, "stock must be non-negative, got -1");
    }
}
