//! Chat relay: an inbound send becomes a room broadcast plus a durable copy
//! forwarded to the persistence service.

use std::sync::Arc;

use tracing::warn;

use crate::event::ServerEvent;
use crate::services::forward::Forwarder;
use crate::services::room::resolve_room;
use crate::state::AppState;

/// Broadcast `text` to everyone in the (user, mentor) room, then hand a copy
/// to the persistence service on a detached task.
///
/// The sender receives its own copy when subscribed. Persistence never gates
/// delivery: the forward runs after the fan-out, unawaited, and its failures
/// are logged and swallowed. Empty ids are routed to their degenerate room
/// rather than rejected.
pub async fn dispatch(state: &AppState, user_id: &str, mentor_id: &str, text: &str) {
    let room_key = resolve_room(user_id, mentor_id);
    let event = ServerEvent::message(user_id, text);

    {
        // Exclusive lock: concurrent dispatches to one room must serialize so
        // every subscriber observes the same message order.
        let chat = state.chat.write().await;
        if let Some(room) = chat.rooms.get(&room_key) {
            room.broadcast(&room_key, &event);
        }
    }

    persist_fire_and_forget(
        Arc::clone(&state.forwarder),
        user_id.to_string(),
        mentor_id.to_string(),
        text.to_string(),
    );
}

/// Spawn the persistence call without awaiting it.
fn persist_fire_and_forget(forwarder: Arc<dyn Forwarder>, user_id: String, mentor_id: String, text: String) {
    tokio::spawn(async move {
        if let Err(e) = forwarder.store_message(&user_id, &mentor_id, &text).await {
            warn!(error = %e, "message persist failed");
        }
    });
}

#[cfg(test)]
#[path = "relay_test.rs"]
mod tests;
