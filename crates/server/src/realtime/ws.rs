//! WebSocket handler for the realtime channel.

use axum::{
    extract::{
        State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::IntoResponse,
};
use chrono::{SecondsFormat, Utc};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use super::protocol::{ClientEvent, ServerEvent};
use crate::state::AppState;

/// WebSocket upgrade handler. No authentication is performed on this channel.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

/// Handle a WebSocket connection for its whole lifetime.
async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    // Outbound messages go through a channel so broadcasts from other
    // connections never touch this socket directly.
    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();
    let client_id = state.hub().register(tx.clone());

    tracing::info!(client_id = %client_id, "realtime client connected");

    let send_task = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            if ws_tx.send(message).await.is_err() {
                break;
            }
        }
    });

    while let Some(message) = ws_rx.next().await {
        let message = match message {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!(client_id = %client_id, "websocket error: {e}");
                break;
            }
        };

        match message {
            Message::Text(text) => handle_event(&state, client_id, &text),
            Message::Ping(data) => {
                if tx.send(Message::Pong(data)).is_err() {
                    break;
                }
            }
            Message::Pong(_) => {}
            Message::Binary(_) => {
                tracing::debug!(client_id = %client_id, "ignoring binary frame");
            }
            Message::Close(_) => break,
        }
    }

    state.hub().unregister(&client_id);
    send_task.abort();

    tracing::info!(client_id = %client_id, "realtime client disconnected");
}

/// Handle a single text frame.
///
/// The channel has no error responses: frames that do not parse as a known
/// event are logged and dropped.
fn handle_event(state: &AppState, client_id: super::ClientId, text: &str) {
    let event: ClientEvent = match serde_json::from_str(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::debug!(client_id = %client_id, "dropping unparseable frame: {e}");
            return;
        }
    };

    match event {
        ClientEvent::Buy {
            nickname,
            goods_id,
            goods_name,
        } => {
            tracing::info!(client_id = %client_id, %nickname, goods_id, "purchase announced");

            state.hub().broadcast(&ServerEvent::BuyGoods {
                nickname,
                goods_id,
                goods_name,
                date: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            });
        }
    }
}
