//! Cart domain types.

use serde::Serialize;

use minimart_core::{GoodsId, UserId};

use super::Goods;

/// A stored cart row: (user, goods) with a quantity.
///
/// At most one row exists per pair; repeated adds overwrite the quantity.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CartEntry {
    pub user_id: UserId,
    pub goods_id: GoodsId,
    pub quantity: i64,
}

/// A cart entry joined with its catalog item, as returned to the client.
///
/// `goods` is absent when the catalog row has since disappeared; the entry is
/// still listed with its quantity.
#[derive(Debug, Clone, Serialize)]
pub struct CartLine {
    pub quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goods: Option<Goods>,
}
