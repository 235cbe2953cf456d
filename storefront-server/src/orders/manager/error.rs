use crate::db::StorageError;
use crate::payments::PaymentError;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Order lifecycle errors
///
/// Display strings are shown to customers as-is.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("El carrito está vacío")]
    EmptyCart,

    #[error("Producto no encontrado: {0}")]
    ProductNotFound(String),

    #[error("Cantidad inválida para {nombre}: {cantidad}")]
    InvalidQuantity { nombre: String, cantidad: f64 },

    #[error("Stock insuficiente para {nombre}. Disponible: {available}, solicitado: {requested}")]
    InsufficientStock {
        product_id: String,
        nombre: String,
        available: u32,
        requested: u64,
    },

    #[error("Pedido no encontrado: {0}")]
    OrderNotFound(String),

    #[error("Estado inválido: {0}")]
    InvalidState(String),

    #[error("Pedido inválido: {0}")]
    InvalidOrder(String),

    #[error(transparent)]
    Payment(#[from] PaymentError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type OrderResult<T> = Result<T, OrderError>;

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        let message = err.to_string();
        match err {
            OrderError::EmptyCart => AppError::with_message(ErrorCode::OrderEmpty, message),
            OrderError::ProductNotFound(id) => {
                AppError::with_message(ErrorCode::CartProductNotFound, message)
                    .with_detail("productId", id)
            }
            OrderError::InvalidQuantity { .. } => {
                AppError::with_message(ErrorCode::InvalidQuantity, message)
            }
            OrderError::InsufficientStock {
                product_id,
                available,
                requested,
                ..
            } => AppError::with_message(ErrorCode::InsufficientStock, message)
                .with_detail("productId", product_id)
                .with_detail("available", available)
                .with_detail("requested", requested),
            OrderError::OrderNotFound(_) => {
                AppError::with_message(ErrorCode::OrderNotFound, message)
            }
            OrderError::InvalidState(_) => {
                AppError::with_message(ErrorCode::InvalidOrderState, message)
            }
            OrderError::InvalidOrder(_) => AppError::with_message(ErrorCode::InvalidOrder, message),
            OrderError::Payment(e) => e.into(),
            OrderError::Storage(e) => AppError::storage(e.to_string()),
        }
    }
}
