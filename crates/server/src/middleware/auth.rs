//! Authentication middleware and extractors.
//!
//! Provides an extractor for requiring bearer-token authentication in route
//! handlers. Guards every route except registration and login.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::db::UserRepository;
use crate::error::AppError;
use crate::models::User;
use crate::state::AppState;

/// Extractor that requires bearer-token authentication.
///
/// Verifies the `Authorization: Bearer <token>` header via the token service
/// and resolves the embedded user ID against the user store. A token whose
/// user no longer exists is rejected.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.nickname)
/// }
/// ```
pub struct RequireAuth(pub User);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AppError::Unauthenticated)?;

        // The scheme must be exactly `Bearer`.
        let (scheme, token) = header.split_once(' ').ok_or(AppError::Unauthenticated)?;
        if scheme != "Bearer" {
            return Err(AppError::Unauthenticated);
        }

        let user_id = state
            .tokens()
            .verify(token)
            .map_err(|_| AppError::Unauthenticated)?;

        let user = UserRepository::new(state.pool())
            .get_by_id(user_id)
            .await?
            .ok_or(AppError::Unauthenticated)?;

        Ok(Self(user))
    }
}
