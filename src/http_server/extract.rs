//! JSON body extractor whose rejections use the API error body.

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;

use super::errors::ApiError;

/// Like [`axum::Json`], but a bad body becomes [`ApiError::InvalidBody`]
/// (400 with `{"message": ...}`) instead of axum's plain-text rejection.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::InvalidBody(rejection.body_text()))?;
        Ok(Self(value))
    }
}
