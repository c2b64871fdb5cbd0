//! User repository for database operations.

use sqlx::SqlitePool;

use minimart_core::UserId;

use super::RepositoryError;
use crate::models::User;

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Check whether a user already claimed the given email or nickname.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn email_or_nickname_taken(
        &self,
        email: &str,
        nickname: &str,
    ) -> Result<bool, RepositoryError> {
        let row = sqlx::query(
            r"
            SELECT 1 FROM users
            WHERE email = $1 OR nickname = $2
            LIMIT 1
            ",
        )
        .bind(email)
        .bind(nickname)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.is_some())
    }

    /// Create a new user.
    ///
    /// The password is stored as given; comparison at login is by equality.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email or nickname already
    /// exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        email: &str,
        nickname: &str,
        password: &str,
    ) -> Result<User, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r"
            INSERT INTO users (email, nickname, password)
            VALUES ($1, $2, $3)
            RETURNING user_id, email, nickname, created_at
            ",
        )
        .bind(email)
        .bind(nickname)
        .bind(password)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("email or nickname already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(user)
    }

    /// Look up a user by exact (email, password) match.
    ///
    /// Returns `None` when no row matches; the caller cannot distinguish an
    /// unknown email from a wrong password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r"
            SELECT user_id, email, nickname, created_at
            FROM users
            WHERE email = $1 AND password = $2
            ",
        )
        .bind(email)
        .bind(password)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r"
            SELECT user_id, email, nickname, created_at
            FROM users
            WHERE user_id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }
}
