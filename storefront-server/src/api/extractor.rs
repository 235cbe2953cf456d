//! JSON body extractor
//!
//! Same as [`axum::Json`] for request bodies, but a body that is not JSON, or
//! has the wrong shape, is rejected with an [`AppError`] (400 `{error, code}`)
//! instead of axum's plain-text 400/415/422.

use axum::extract::{FromRequest, Request, rejection::JsonRejection};

use crate::utils::AppError;

/// Request body deserialized from JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(status = %rejection.status(), "request body rejected");
                Err(AppError::invalid_request(rejection.body_text()))
            }
        }
    }
}
