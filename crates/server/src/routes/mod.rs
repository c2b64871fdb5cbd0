//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! # Accounts
//! POST   /api/users                 - Register
//! POST   /api/auth                  - Login, returns a bearer token
//! GET    /api/users/me              - Current user (requires auth)
//!
//! # Catalog
//! GET    /api/goods                 - List goods, optional ?category= filter (requires auth)
//! GET    /api/goods/{goodsId}       - Goods detail (requires auth)
//!
//! # Cart
//! GET    /api/goods/cart            - List cart entries (requires auth)
//! PUT    /api/goods/{goodsId}/cart  - Set quantity, upsert (requires auth)
//! DELETE /api/goods/{goodsId}/cart  - Remove entry, idempotent (requires auth)
//! ```

pub mod auth;
pub mod goods;
pub mod users;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::realtime;
use crate::state::AppState;

/// Create the user routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(users::register))
        .route("/me", get(users::me))
}

/// Create the goods and cart routes router.
pub fn goods_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(goods::index))
        .route("/cart", get(goods::cart_index))
        .route("/{goods_id}", get(goods::show))
        .route(
            "/{goods_id}/cart",
            put(goods::cart_upsert).delete(goods::cart_delete),
        )
}

/// Create the `/api` router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/auth", post(auth::login))
        .nest("/users", user_routes())
        .nest("/goods", goods_routes())
}

/// Create all routes for the server: the `/api` surface plus the realtime
/// channel.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api", api_routes())
        .route("/ws", get(realtime::ws_handler))
}
