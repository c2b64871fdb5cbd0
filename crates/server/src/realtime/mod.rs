//! Realtime purchase-event broadcast.
//!
//! Clients connect over a WebSocket at `/ws` (no authentication on this
//! channel). A `BUY` event from any client is stamped with the current time
//! and fanned out as `BUY_GOODS` to every connected client, including the
//! sender. Nothing is persisted and nothing is retried.

pub mod hub;
pub mod protocol;
pub mod ws;

pub use hub::{BroadcastHub, ClientId};
pub use protocol::{ClientEvent, ServerEvent};
pub use ws::ws_handler;
