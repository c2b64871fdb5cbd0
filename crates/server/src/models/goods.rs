//! Catalog item domain type.

use serde::Serialize;

use minimart_core::GoodsId;

/// A catalog item.
///
/// Read-only from the handlers' perspective; rows are seeded externally.
/// Serializes with the camelCase field names the storefront client expects.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Goods {
    pub goods_id: GoodsId,
    pub name: String,
    pub thumbnail_url: String,
    pub category: String,
    pub price: i64,
}
