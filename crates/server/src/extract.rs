//! Request body extractors.

use axum::{
    Form, Json,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Extractor accepting a request body as either JSON or a URL-encoded form.
///
/// The storefront client posts JSON, but URL-encoded submissions are accepted
/// on the same routes. Any body that fails to deserialize surfaces as a
/// generic 400.
pub struct JsonOrForm<T>(pub T);

impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        if content_type.starts_with("application/json") {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|_| bad_body())?;
            return Ok(Self(value));
        }

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|_| bad_body())?;
            return Ok(Self(value));
        }

        Err(bad_body())
    }
}

fn bad_body() -> AppError {
    AppError::BadRequest("the requested data is not valid".to_string())
}
