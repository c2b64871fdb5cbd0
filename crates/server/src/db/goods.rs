//! Goods repository for catalog reads.
//!
//! The catalog is read-only from the handlers' perspective.

use sqlx::SqlitePool;

use minimart_core::GoodsId;

use super::RepositoryError;
use crate::models::Goods;

/// Repository for catalog reads.
pub struct GoodsRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> GoodsRepository<'a> {
    /// Create a new goods repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List catalog items, newest first, optionally filtered by category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, category: Option<&str>) -> Result<Vec<Goods>, RepositoryError> {
        let goods = match category {
            Some(category) => {
                sqlx::query_as::<_, Goods>(
                    r"
                    SELECT goods_id, name, thumbnail_url, category, price
                    FROM goods
                    WHERE category = $1
                    ORDER BY goods_id DESC
                    ",
                )
                .bind(category)
                .fetch_all(self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Goods>(
                    r"
                    SELECT goods_id, name, thumbnail_url, category, price
                    FROM goods
                    ORDER BY goods_id DESC
                    ",
                )
                .fetch_all(self.pool)
                .await?
            }
        };

        Ok(goods)
    }

    /// Get a single catalog item by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: GoodsId) -> Result<Option<Goods>, RepositoryError> {
        let goods = sqlx::query_as::<_, Goods>(
            r"
            SELECT goods_id, name, thumbnail_url, category, price
            FROM goods
            WHERE goods_id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(goods)
    }

    /// Batch-resolve catalog items by ID.
    ///
    /// Missing IDs are simply absent from the result; order is unspecified.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_many(&self, ids: &[GoodsId]) -> Result<Vec<Goods>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder = sqlx::QueryBuilder::<sqlx::Sqlite>::new(
            "SELECT goods_id, name, thumbnail_url, category, price FROM goods WHERE goods_id IN (",
        );
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id.as_i64());
        }
        builder.push(")");

        let goods = builder
            .build_query_as::<Goods>()
            .fetch_all(self.pool)
            .await?;

        Ok(goods)
    }
}
