//! Cart repository for per-user line items.

use sqlx::SqlitePool;

use minimart_core::{GoodsId, UserId};

use super::RepositoryError;
use crate::models::CartEntry;

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Fetch all cart entries for a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn entries_for_user(&self, user_id: UserId) -> Result<Vec<CartEntry>, RepositoryError> {
        let entries = sqlx::query_as::<_, CartEntry>(
            r"
            SELECT user_id, goods_id, quantity
            FROM carts
            WHERE user_id = $1
            ORDER BY goods_id ASC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(entries)
    }

    /// Set the quantity for a (user, goods) pair.
    ///
    /// Creates the entry on first add; overwrites the quantity on subsequent
    /// adds (last write wins).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn upsert(
        &self,
        user_id: UserId,
        goods_id: GoodsId,
        quantity: i64,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO carts (user_id, goods_id, quantity)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, goods_id) DO UPDATE SET quantity = excluded.quantity
            ",
        )
        .bind(user_id)
        .bind(goods_id)
        .bind(quantity)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Delete the entry for a (user, goods) pair.
    ///
    /// Idempotent: deleting an absent entry is not an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, user_id: UserId, goods_id: GoodsId) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            DELETE FROM carts
            WHERE user_id = $1 AND goods_id = $2
            ",
        )
        .bind(user_id)
        .bind(goods_id)
        .execute(self.pool)
        .await?;

        Ok(())
    }
}
