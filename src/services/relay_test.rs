use super::*;
use std::time::Duration;

use tokio::sync::mpsc;
use uuid::Uuid;

use crate::services::room::{join_room, resolve_room};
use crate::state::test_helpers::{ForwardCall, recording_forwarder, test_app_state, test_app_state_with_forwarder};

// ===== HELPERS =====

async fn joined_client(state: &AppState, user_id: &str, mentor_id: &str) -> (Uuid, mpsc::Receiver<ServerEvent>) {
    let conn_id = Uuid::new_v4();
    let (tx, rx) = mpsc::channel::<ServerEvent>(8);
    join_room(state, conn_id, &resolve_room(user_id, mentor_id), tx).await;
    (conn_id, rx)
}

async fn recv_message(rx: &mut mpsc::Receiver<ServerEvent>) -> (String, String, i64) {
    let event = tokio::time::timeout(Duration::from_millis(500), rx.recv())
        .await
        .expect("timed out waiting for message")
        .expect("channel closed");
    let ServerEvent::Message { sender, text, timestamp } = event;
    (sender, text, timestamp)
}

async fn assert_no_message(rx: &mut mpsc::Receiver<ServerEvent>) {
    let result = tokio::time::timeout(Duration::from_millis(80), rx.recv()).await;
    assert!(result.is_err(), "expected no delivery, got {result:?}");
}

// ===== DELIVERY =====

#[tokio::test]
async fn dispatch_delivers_to_all_subscribers_including_sender() {
    let state = test_app_state();
    let (_sender_conn, mut rx_sender) = joined_client(&state, "u1", "m1").await;
    let (_peer_conn, mut rx_peer) = joined_client(&state, "u1", "m1").await;

    dispatch(&state, "u1", "m1", "hello").await;

    let (sender, text, timestamp) = recv_message(&mut rx_sender).await;
    assert_eq!(sender, "u1");
    assert_eq!(text, "hello");
    assert!(timestamp > 0);

    let (sender, text, _) = recv_message(&mut rx_peer).await;
    assert_eq!(sender, "u1");
    assert_eq!(text, "hello");
}

#[tokio::test]
async fn dispatch_does_not_leak_across_rooms() {
    let state = test_app_state();
    let (_x, mut rx_x) = joined_client(&state, "u1", "m1").await;
    // Reversed pair: a different room by construction.
    let (_y, mut rx_y) = joined_client(&state, "m1", "u1").await;

    dispatch(&state, "u1", "m1", "hello").await;

    let (_, text, _) = recv_message(&mut rx_x).await;
    assert_eq!(text, "hello");
    assert_no_message(&mut rx_y).await;
}

#[tokio::test]
async fn dispatch_to_empty_room_is_a_noop() {
    let state = test_app_state();
    dispatch(&state, "u1", "m1", "nobody home").await;
    assert!(state.chat.read().await.rooms.is_empty());
}

#[tokio::test]
async fn dispatch_preserves_order_for_all_observers() {
    let state = test_app_state();
    let (_a, mut rx_a) = joined_client(&state, "u1", "m1").await;
    let (_b, mut rx_b) = joined_client(&state, "u1", "m1").await;

    dispatch(&state, "u1", "m1", "first").await;
    dispatch(&state, "u1", "m1", "second").await;

    for rx in [&mut rx_a, &mut rx_b] {
        let (_, first, _) = recv_message(rx).await;
        let (_, second, _) = recv_message(rx).await;
        assert_eq!(first, "first");
        assert_eq!(second, "second");
    }
}

#[tokio::test]
async fn dispatch_with_empty_ids_routes_to_degenerate_room() {
    let state = test_app_state();
    let (_conn, mut rx) = joined_client(&state, "", "").await;

    dispatch(&state, "", "", "still flows").await;

    let (sender, text, _) = recv_message(&mut rx).await;
    assert_eq!(sender, "");
    assert_eq!(text, "still flows");
}

// ===== PERSISTENCE FORWARDING =====

#[tokio::test]
async fn dispatch_forwards_a_copy_for_storage() {
    let (forwarder, mut calls) = recording_forwarder(false);
    let state = test_app_state_with_forwarder(forwarder);
    let (_conn, mut rx) = joined_client(&state, "u1", "m1").await;

    dispatch(&state, "u1", "m1", "keep this").await;

    let (_, text, _) = recv_message(&mut rx).await;
    assert_eq!(text, "keep this");

    let call = tokio::time::timeout(Duration::from_millis(500), calls.recv())
        .await
        .expect("timed out waiting for forward")
        .expect("channel closed");
    assert_eq!(
        call,
        ForwardCall::Store { user_id: "u1".into(), mentor_id: "m1".into(), text: "keep this".into() }
    );
}

#[tokio::test]
async fn dispatch_survives_forwarder_failure() {
    let (forwarder, mut calls) = recording_forwarder(true);
    let state = test_app_state_with_forwarder(forwarder);
    let (_conn, mut rx) = joined_client(&state, "u1", "m1").await;

    dispatch(&state, "u1", "m1", "delivered live").await;

    // Broadcast happened even though the store call fails.
    let (_, text, _) = recv_message(&mut rx).await;
    assert_eq!(text, "delivered live");

    // The forward was attempted; its failure stayed inside the spawned task.
    let call = tokio::time::timeout(Duration::from_millis(500), calls.recv())
        .await
        .expect("timed out waiting for forward")
        .expect("channel closed");
    assert!(matches!(call, ForwardCall::Store { .. }));
}

#[tokio::test]
async fn dispatch_forwards_even_with_no_subscribers() {
    let (forwarder, mut calls) = recording_forwarder(false);
    let state = test_app_state_with_forwarder(forwarder);

    dispatch(&state, "u1", "m1", "archive only").await;

    let call = tokio::time::timeout(Duration::from_millis(500), calls.recv())
        .await
        .expect("timed out waiting for forward")
        .expect("channel closed");
    assert!(matches!(call, ForwardCall::Store { .. }));
}
