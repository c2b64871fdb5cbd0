//! Domain types shared across repositories and route handlers.

pub mod cart;
pub mod goods;
pub mod user;

pub use cart::{CartEntry, CartLine};
pub use goods::Goods;
pub use user::User;
