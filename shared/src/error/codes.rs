//! Unified error codes for the storefront
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 4xxx: Order and cart errors
//! - 5xxx: Payment provider errors
//! - 6xxx: Product errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Serialized as its numeric value so the storefront and admin frontends can
/// switch on it without string matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Auth ====================
    /// Missing admin credential
    NotAuthenticated = 1001,
    /// Admin token does not match
    TokenInvalid = 1004,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Cart has no items
    OrderEmpty = 4007,
    /// Order state is not one of the canonical states
    InvalidOrderState = 4008,
    /// Item quantity is not a positive integer
    InvalidQuantity = 4009,
    /// Not enough stock to reserve an item
    InsufficientStock = 4010,
    /// Cart references a product that does not exist
    CartProductNotFound = 4011,
    /// Order cannot be paid (no items or non-positive total)
    InvalidOrder = 4012,

    // ==================== 5xxx: Payment ====================
    /// Line items do not add up to the order total
    PaymentTotalMismatch = 5006,
    /// Payment provider answered with an error
    PaymentProviderError = 5007,
    /// Payment provider did not answer in time
    PaymentTimeout = 5008,
    /// Payment provider credentials present but integration incomplete
    PaymentNotConfigured = 5009,
    /// A line item has a non-positive price or quantity
    PaymentInvalidItem = 5011,

    // ==================== 6xxx: Product ====================
    /// Product not found
    ProductNotFound = 6001,
    /// Product price must be positive
    ProductInvalidPrice = 6002,
    /// Product id already taken
    ProductIdExists = 6003,
    /// Product stock must be non-negative
    ProductInvalidStock = 6004,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Persistence failure (reading or writing a data file)
    StorageError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default message for this error code
    pub fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field missing",

            // Auth
            ErrorCode::NotAuthenticated => "Admin credential required",
            ErrorCode::TokenInvalid => "Invalid admin token",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderEmpty => "Cart is empty",
            ErrorCode::InvalidOrderState => "Invalid order state",
            ErrorCode::InvalidQuantity => "Invalid quantity",
            ErrorCode::InsufficientStock => "Insufficient stock",
            ErrorCode::CartProductNotFound => "Product in cart not found",
            ErrorCode::InvalidOrder => "Order cannot be paid",

            // Payment
            ErrorCode::PaymentTotalMismatch => "Order total does not match line items",
            ErrorCode::PaymentProviderError => "Payment provider error",
            ErrorCode::PaymentTimeout => "Payment provider timed out",
            ErrorCode::PaymentNotConfigured => "Payment provider not configured",
            ErrorCode::PaymentInvalidItem => "Invalid payment line item",

            // Product
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::ProductInvalidPrice => "Product price must be positive",
            ErrorCode::ProductIdExists => "Product id already exists",
            ErrorCode::ProductInvalidStock => "Product stock must be non-negative",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::StorageError => "Storage error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            5 => Ok(ErrorCode::InvalidRequest),
            7 => Ok(ErrorCode::RequiredField),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1004 => Ok(ErrorCode::TokenInvalid),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4007 => Ok(ErrorCode::OrderEmpty),
            4008 => Ok(ErrorCode::InvalidOrderState),
            4009 => Ok(ErrorCode::InvalidQuantity),
            4010 => Ok(ErrorCode::InsufficientStock),
            4011 => Ok(ErrorCode::CartProductNotFound),
            4012 => Ok(ErrorCode::InvalidOrder),

            // Payment
            5006 => Ok(ErrorCode::PaymentTotalMismatch),
            5007 => Ok(ErrorCode::PaymentProviderError),
            5008 => Ok(ErrorCode::PaymentTimeout),
            5009 => Ok(ErrorCode::PaymentNotConfigured),
            5011 => Ok(ErrorCode::PaymentInvalidItem),

            // Product
            6001 => Ok(ErrorCode::ProductNotFound),
            6002 => Ok(ErrorCode::ProductInvalidPrice),
            6003 => Ok(ErrorCode::ProductIdExists),
            6004 => Ok(ErrorCode::ProductInvalidStock),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::StorageError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
