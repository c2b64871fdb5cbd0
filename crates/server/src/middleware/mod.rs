//! Request middleware for the storefront API.

pub mod auth;

pub use auth::RequireAuth;
