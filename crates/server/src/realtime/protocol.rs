//! Realtime channel event types.
//!
//! Defines the JSON wire format for the purchase broadcast. Events are
//! tagged by an `event` field; payload fields use camelCase names.

use serde::{Deserialize, Serialize};

// ============================================================================
// Client → Server Events
// ============================================================================

/// Event sent from client to server.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event")]
pub enum ClientEvent {
    /// A purchase announcement. Fields are forwarded as-is; nothing is
    /// validated against the catalog.
    #[serde(rename = "BUY", rename_all = "camelCase")]
    Buy {
        nickname: String,
        goods_id: i64,
        goods_name: String,
    },
}

// ============================================================================
// Server → Client Events
// ============================================================================

/// Event sent from server to every connected client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum ServerEvent {
    /// A purchase announcement, stamped with an ISO-8601 timestamp.
    #[serde(rename = "BUY_GOODS", rename_all = "camelCase")]
    BuyGoods {
        nickname: String,
        goods_id: i64,
        goods_name: String,
        date: String,
    },
}
