//! Login route handler.

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::json;

use crate::db::UserRepository;
use crate::error::{AppError, Result};
use crate::extract::JsonOrForm;
use crate::state::AppState;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Handle login.
///
/// Looks up a user by exact (email, password) match and issues a bearer
/// token. Passwords are compared in clear form, matching the system this
/// replaces; the response does not reveal which of the two fields was wrong.
pub async fn login(
    State(state): State<AppState>,
    JsonOrForm(form): JsonOrForm<LoginForm>,
) -> Result<Json<serde_json::Value>> {
    let user = UserRepository::new(state.pool())
        .find_by_credentials(&form.email, &form.password)
        .await?
        .ok_or_else(|| AppError::BadRequest("incorrect email or password".to_string()))?;

    let token = state.tokens().issue(user.user_id)?;

    tracing::debug!(user_id = %user.user_id, "login succeeded");

    Ok(Json(json!({ "token": token })))
}
