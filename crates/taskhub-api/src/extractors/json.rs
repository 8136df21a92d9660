//! JSON extractor that runs request validation.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

use taskhub_core::error::AppError;

use crate::error::ApiError;

/// `Json<T>` plus a `validator` pass, with rejections mapped to the
/// standard 400 body instead of Axum's default rejection format.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(format!("Invalid request body: {e}")))?;

        value
            .validate()
            .map_err(|e| AppError::validation(format!("Validation failed: {e}")))?;

        Ok(Self(value))
    }
}
