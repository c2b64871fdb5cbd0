//! User domain type.

use chrono::{DateTime, Utc};

use minimart_core::UserId;

/// A registered user.
///
/// The stored password never leaves the repository layer; handlers only see
/// this type.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub user_id: UserId,
    /// User's email address (unique).
    pub email: String,
    /// Display name (unique).
    pub nickname: String,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
}
