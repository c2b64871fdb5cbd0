//! Catalog and cart route handlers.

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use serde_json::json;

use minimart_core::GoodsId;

use crate::db::{CartRepository, GoodsRepository};
use crate::error::{AppError, Result};
use crate::extract::JsonOrForm;
use crate::middleware::RequireAuth;
use crate::models::{CartLine, Goods};
use crate::state::AppState;

/// Query parameters for the goods listing.
#[derive(Debug, Deserialize)]
pub struct GoodsQuery {
    pub category: Option<String>,
}

/// Cart upsert body.
#[derive(Debug, Deserialize)]
pub struct CartUpsertForm {
    pub quantity: i64,
}

/// List catalog items, newest first, optionally filtered by category.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(query): Query<GoodsQuery>,
) -> Result<Json<serde_json::Value>> {
    let goods = GoodsRepository::new(state.pool())
        .list(query.category.as_deref())
        .await?;

    Ok(Json(json!({ "goods": goods })))
}

/// Return a single catalog item, or 404 if the identifier is unknown.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(goods_id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    let goods = GoodsRepository::new(state.pool())
        .get(GoodsId::new(goods_id))
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(json!({ "goods": goods })))
}

/// List the authenticated user's cart with goods batch-resolved by ID.
pub async fn cart_index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<serde_json::Value>> {
    let entries = CartRepository::new(state.pool())
        .entries_for_user(user.user_id)
        .await?;

    let goods_ids: Vec<GoodsId> = entries.iter().map(|entry| entry.goods_id).collect();
    let mut goods_by_id: HashMap<GoodsId, Goods> = GoodsRepository::new(state.pool())
        .get_many(&goods_ids)
        .await?
        .into_iter()
        .map(|goods| (goods.goods_id, goods))
        .collect();

    let cart: Vec<CartLine> = entries
        .into_iter()
        .map(|entry| CartLine {
            quantity: entry.quantity,
            goods: goods_by_id.remove(&entry.goods_id),
        })
        .collect();

    Ok(Json(json!({ "cart": cart })))
}

/// Set the quantity for a cart entry, creating it on first add.
pub async fn cart_upsert(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(goods_id): Path<i64>,
    JsonOrForm(form): JsonOrForm<CartUpsertForm>,
) -> Result<Json<serde_json::Value>> {
    CartRepository::new(state.pool())
        .upsert(user.user_id, GoodsId::new(goods_id), form.quantity)
        .await?;

    Ok(Json(json!({})))
}

/// Remove a cart entry. Removing an absent entry succeeds.
pub async fn cart_delete(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(goods_id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    CartRepository::new(state.pool())
        .delete(user.user_id, GoodsId::new(goods_id))
        .await?;

    Ok(Json(json!({})))
}
