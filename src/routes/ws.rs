//! WebSocket chat endpoint.
//!
//! DESIGN
//! ======
//! On upgrade each connection gets an id and a bounded outbound queue, then
//! enters a `select!` loop: inbound text is parsed and dispatched, queued
//! broadcasts are written to the socket. `process_inbound_text` carries the
//! dispatch logic so tests can drive it without a socket.
//!
//! LIFECYCLE
//! =========
//! 1. Upgrade → connection id + outbound channel
//! 2. `joinRoom` → subscribe + registry update (earlier rooms stay live)
//! 3. `sendMessage` → room broadcast + detached persistence forward
//! 4. Close → registry entry removed, every subscription dropped

use std::collections::HashSet;

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::event::{ClientEvent, ServerEvent};
use crate::services::{relay, room};
use crate::state::AppState;

/// Outbound queue depth per connection.
const CLIENT_QUEUE_DEPTH: usize = 256;

// =============================================================================
// UPGRADE
// =============================================================================

pub async fn handle_ws(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| run_ws(socket, state))
}

// =============================================================================
// CONNECTION
// =============================================================================

async fn run_ws(mut socket: WebSocket, state: AppState) {
    let conn_id = Uuid::new_v4();
    let (client_tx, mut client_rx) = mpsc::channel::<ServerEvent>(CLIENT_QUEUE_DEPTH);

    info!(%conn_id, "ws: client connected");

    // Every room this connection subscribed to, for teardown.
    let mut joined: HashSet<String> = HashSet::new();

    loop {
        tokio::select! {
            msg = socket.recv() => {
                let Some(msg) = msg else { break };
                let Ok(msg) = msg else { break };
                match msg {
                    Message::Text(text) => {
                        process_inbound_text(&state, conn_id, &client_tx, &mut joined, &text).await;
                    }
                    Message::Close(_) => break,
                    _ => {}
                }
            }
            Some(event) = client_rx.recv() => {
                if send_event(&mut socket, &event).await.is_err() {
                    break;
                }
            }
        }
    }

    let rooms: Vec<String> = joined.into_iter().collect();
    let last_room = state.chat.read().await.current_room(conn_id).map(ToString::to_string);
    room::disconnect(&state, conn_id, &rooms).await;
    info!(%conn_id, last_room = ?last_room, "ws: client disconnected");
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Parse one inbound text payload and apply it. Unknown or unparseable
/// events are logged and dropped; chat clients get no error channel.
async fn process_inbound_text(
    state: &AppState,
    conn_id: Uuid,
    client_tx: &mpsc::Sender<ServerEvent>,
    joined: &mut HashSet<String>,
    text: &str,
) {
    let event: ClientEvent = match serde_json::from_str(text) {
        Ok(event) => event,
        Err(e) => {
            warn!(%conn_id, error = %e, "ws: dropping unparseable event");
            return;
        }
    };

    match event {
        ClientEvent::JoinRoom { user_id, mentor_id } => {
            let room_key = room::resolve_room(&user_id, &mentor_id);
            room::join_room(state, conn_id, &room_key, client_tx.clone()).await;
            joined.insert(room_key);
        }
        ClientEvent::SendMessage { user_id, mentor_id, text } => {
            relay::dispatch(state, &user_id, &mentor_id, &text).await;
        }
    }
}

async fn send_event(socket: &mut WebSocket, event: &ServerEvent) -> Result<(), axum::Error> {
    let payload = match serde_json::to_string(event) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(error = %e, "ws: event serialization failed");
            return Ok(());
        }
    };
    socket.send(Message::Text(payload.into())).await
}

#[cfg(test)]
#[path = "ws_test.rs"]
mod tests;
