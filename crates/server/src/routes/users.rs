//! Registration and account route handlers.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use serde_json::json;

use crate::db::{RepositoryError, UserRepository};
use crate::error::{AppError, Result};
use crate::extract::JsonOrForm;
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Registration form data.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    pub nickname: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Handle registration.
///
/// The password confirmation is checked before any storage access; duplicate
/// email or nickname fails with the same 400 regardless of which field
/// collides.
pub async fn register(
    State(state): State<AppState>,
    JsonOrForm(form): JsonOrForm<RegisterForm>,
) -> Result<impl IntoResponse> {
    if form.password != form.confirm_password {
        return Err(AppError::BadRequest(
            "password does not match the confirmation".to_string(),
        ));
    }

    let users = UserRepository::new(state.pool());

    if users
        .email_or_nickname_taken(&form.email, &form.nickname)
        .await?
    {
        return Err(already_registered());
    }

    let user = users
        .create(&form.email, &form.nickname, &form.password)
        .await
        .map_err(|e| match e {
            // Lost the race between the existence check and the insert.
            RepositoryError::Conflict(_) => already_registered(),
            other => AppError::Database(other),
        })?;

    tracing::info!(user_id = %user.user_id, "user registered");

    Ok((StatusCode::CREATED, Json(json!({}))))
}

fn already_registered() -> AppError {
    AppError::BadRequest("email or nickname is already registered".to_string())
}

/// Return the authenticated user's profile.
pub async fn me(RequireAuth(user): RequireAuth) -> Json<serde_json::Value> {
    Json(json!({
        "user": {
            "email": user.email,
            "nickname": user.nickname,
        }
    }))
}
