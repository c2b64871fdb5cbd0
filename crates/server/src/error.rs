//! Unified error handling for route handlers.
//!
//! Provides a unified `AppError` type mapped to the storefront's wire format:
//! flat JSON bodies of the form `{"errorMessage": ...}`. All route handlers
//! return `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::TokenError;

/// Application-level error type for the storefront API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed input or business-rule violation.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Missing, malformed, or unresolvable bearer token.
    #[error("unauthenticated")]
    Unauthenticated,

    /// Unknown goods identifier.
    #[error("not found")]
    NotFound,

    /// Database operation failed.
    #[error("database error: {0}")]
    Database(#[from] RepositoryError),

    /// Token service failed.
    #[error("token error: {0}")]
    Token(#[from] TokenError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Storage and token failures are downgraded to a generic 400; a
        // single request's failure never affects others.
        if matches!(self, Self::Database(_) | Self::Token(_)) {
            tracing::error!(error = %self, "Request error");
        }

        let status = match &self {
            Self::BadRequest(_) | Self::Database(_) | Self::Token(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
        };

        // Unknown-goods responses carry an empty object; everything else
        // reports a flat errorMessage.
        let body = match self {
            Self::BadRequest(message) => json!({ "errorMessage": message }),
            Self::Unauthenticated => json!({ "errorMessage": "please log in" }),
            Self::NotFound => json!({}),
            Self::Database(_) | Self::Token(_) => {
                json!({ "errorMessage": "the requested data is not valid" })
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
