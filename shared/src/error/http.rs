//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // 404 Not Found
            Self::OrderNotFound | Self::ProductNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::ProductIdExists => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated | Self::TokenInvalid => StatusCode::UNAUTHORIZED,

            // 502 Bad Gateway (provider answered with an error)
            Self::PaymentProviderError => StatusCode::BAD_GATEWAY,

            // 504 Gateway Timeout (retryable by the caller)
            Self::PaymentTimeout => StatusCode::GATEWAY_TIMEOUT,

            // 501 Not Implemented
            Self::PaymentNotConfigured => StatusCode::NOT_IMPLEMENTED,

            // 500 Internal Server Error
            Self::InternalError | Self::StorageError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (default for validation/business errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status() {
        assert_eq!(
            ErrorCode::OrderNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ErrorCode::ProductNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_cart_errors_are_bad_request() {
        assert_eq!(
            ErrorCode::CartProductNotFound.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::InsufficientStock.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ErrorCode::OrderEmpty.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ErrorCode::PaymentTotalMismatch.http_status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_conflict_status() {
        assert_eq!(
            ErrorCode::ProductIdExists.http_status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_unauthorized_status() {
        assert_eq!(
            ErrorCode::NotAuthenticated.http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ErrorCode::TokenInvalid.http_status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_provider_status() {
        assert_eq!(
            ErrorCode::PaymentProviderError.http_status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ErrorCode::PaymentTimeout.http_status(),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            ErrorCode::PaymentNotConfigured.http_status(),
            StatusCode::NOT_IMPLEMENTED
        );
    }

    #[test]
    fn test_internal_error_status() {
        assert_eq!(
            ErrorCode::StorageError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ErrorCode::InternalError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
