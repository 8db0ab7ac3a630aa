//! Room membership: key derivation and subscriber bookkeeping.
//!
//! DESIGN
//! ======
//! A room is a broadcast group keyed by `chat_{userId}_{mentorId}`. Rooms
//! exist only while they have subscribers: the first subscribe creates the
//! map entry, the last unsubscribe evicts it. The registry records each
//! connection's most recent room. Joining another room overwrites the
//! registry entry but leaves the old subscription in place. Clients that
//! re-join with a different partner keep receiving both rooms until they
//! disconnect.

use std::collections::HashMap;

use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::event::ServerEvent;
use crate::state::AppState;

// =============================================================================
// ROOM
// =============================================================================

/// Broadcast group: connection id -> outbound queue.
#[derive(Default)]
pub struct Room {
    clients: HashMap<Uuid, mpsc::Sender<ServerEvent>>,
}

impl Room {
    /// Add or refresh a subscriber slot. Keyed by connection id, so a repeat
    /// subscribe replaces the slot instead of doubling delivery.
    pub fn subscribe(&mut self, conn_id: Uuid, tx: mpsc::Sender<ServerEvent>) {
        self.clients.insert(conn_id, tx);
    }

    pub fn unsubscribe(&mut self, conn_id: Uuid) {
        self.clients.remove(&conn_id);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    /// Queue one copy of `event` to every subscriber, the sender included.
    /// A full queue drops the event for that client rather than blocking the
    /// rest of the room.
    pub fn broadcast(&self, room_key: &str, event: &ServerEvent) {
        for (conn_id, tx) in &self.clients {
            if let Err(e) = tx.try_send(event.clone()) {
                warn!(%conn_id, room = %room_key, error = %e, "dropping event for slow client");
            }
        }
    }
}

// =============================================================================
// CHAT STATE
// =============================================================================

/// Live rooms plus the connection registry. Both sit behind one lock (see
/// `AppState`) so join, teardown, and fan-out stay atomic relative to each
/// other.
#[derive(Default)]
pub struct ChatState {
    pub(crate) rooms: HashMap<String, Room>,
    /// connection id -> room key recorded by the most recent join.
    pub(crate) registry: HashMap<Uuid, String>,
}

impl ChatState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Room recorded for a connection by its last join, if any.
    #[must_use]
    pub fn current_room(&self, conn_id: Uuid) -> Option<&str> {
        self.registry.get(&conn_id).map(String::as_str)
    }

    /// Number of live subscribers in a room. Zero for unknown rooms.
    #[must_use]
    pub fn room_len(&self, room_key: &str) -> usize {
        self.rooms.get(room_key).map_or(0, Room::len)
    }
}

// =============================================================================
// OPERATIONS
// =============================================================================

/// Derive the broadcast key for a (user, mentor) pair.
///
/// Argument order matters: `(A, B)` and `(B, A)` name different rooms. Inputs
/// are opaque and unvalidated; empty strings yield a degenerate but routable
/// key such as `chat__`.
#[must_use]
pub fn resolve_room(user_id: &str, mentor_id: &str) -> String {
    format!("chat_{user_id}_{mentor_id}")
}

/// Subscribe `conn_id` to `room_key` and record it as the connection's
/// current room. Idempotent per room. A different room overwrites the
/// registry entry without unsubscribing the old room.
pub async fn join_room(state: &AppState, conn_id: Uuid, room_key: &str, tx: mpsc::Sender<ServerEvent>) {
    let mut chat = state.chat.write().await;
    chat.rooms.entry(room_key.to_string()).or_default().subscribe(conn_id, tx);
    chat.registry.insert(conn_id, room_key.to_string());
    info!(%conn_id, room = %room_key, members = chat.room_len(room_key), "joined room");
}

/// Tear down a connection: drop its registry entry and unsubscribe it from
/// every room in `joined` (the rooms its transport task subscribed to over
/// its lifetime). Rooms left empty are evicted.
pub async fn disconnect(state: &AppState, conn_id: Uuid, joined: &[String]) {
    let mut chat = state.chat.write().await;
    chat.registry.remove(&conn_id);
    for room_key in joined {
        if let Some(room) = chat.rooms.get_mut(room_key) {
            room.unsubscribe(conn_id);
            info!(%conn_id, room = %room_key, remaining = room.len(), "left room");
            if room.is_empty() {
                chat.rooms.remove(room_key);
            }
        }
    }
}

#[cfg(test)]
#[path = "room_test.rs"]
mod tests;
