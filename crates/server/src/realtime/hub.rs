//! Connected-client registry and broadcast fan-out.

use axum::extract::ws::Message;
use dashmap::DashMap;
use tokio::sync::mpsc;
use uuid::Uuid;

use super::protocol::ServerEvent;

/// Unique connection identifier.
pub type ClientId = Uuid;

/// Registry of connected realtime clients.
///
/// Each client is identified by an ephemeral connection handle and owns an
/// outbound channel drained by its socket task. Publishing iterates a
/// snapshot of the current subscribers, so registrations racing a broadcast
/// never invalidate the iteration.
pub struct BroadcastHub {
    clients: DashMap<ClientId, mpsc::UnboundedSender<Message>>,
}

impl BroadcastHub {
    /// Create an empty hub.
    #[must_use]
    pub fn new() -> Self {
        Self {
            clients: DashMap::new(),
        }
    }

    /// Register a newly connected client and return its handle.
    pub fn register(&self, tx: mpsc::UnboundedSender<Message>) -> ClientId {
        let id = Uuid::new_v4();
        self.clients.insert(id, tx);
        tracing::debug!(client_id = %id, "realtime client registered");
        id
    }

    /// Remove a client from the registry.
    pub fn unregister(&self, id: &ClientId) {
        if self.clients.remove(id).is_some() {
            tracing::debug!(client_id = %id, "realtime client unregistered");
        }
    }

    /// Number of currently connected clients.
    #[must_use]
    pub fn client_count(&self) -> usize {
        self.clients.len()
    }

    /// Fan an event out to every connected client, including the sender.
    ///
    /// The event is serialized once. A failed send means the client's socket
    /// task already went away; its registration is cleaned up on disconnect.
    pub fn broadcast(&self, event: &ServerEvent) {
        let json = match serde_json::to_string(event) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("failed to serialize broadcast event: {e}");
                return;
            }
        };

        let snapshot: Vec<(ClientId, mpsc::UnboundedSender<Message>)> = self
            .clients
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();

        for (id, tx) in snapshot {
            if tx.send(Message::Text(json.clone().into())).is_err() {
                tracing::debug!(client_id = %id, "dropping send to disconnected client");
            }
        }
    }
}

impl Default for BroadcastHub {
    fn default() -> Self {
        Self::new()
    }
}
