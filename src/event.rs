//! Wire protocol for the chat channel.
//!
//! DESIGN
//! ======
//! Events travel as tagged JSON: `{"event": "...", "data": {...}}`. Inbound
//! payloads keep the field names chat clients already send (`userId`,
//! `mentorId`). Missing fields deserialize to empty strings instead of
//! failing the whole event, so a sloppy client degrades to a degenerate room
//! key rather than a silently dropped message.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

// =============================================================================
// INBOUND
// =============================================================================

/// Events a connected client may send.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ClientEvent {
    /// Subscribe the connection to the room for a (user, mentor) pair.
    #[serde(rename = "joinRoom")]
    JoinRoom {
        #[serde(rename = "userId", default)]
        user_id: String,
        #[serde(rename = "mentorId", default)]
        mentor_id: String,
    },
    /// Relay a chat message to the (user, mentor) room.
    #[serde(rename = "sendMessage")]
    SendMessage {
        #[serde(rename = "userId", default)]
        user_id: String,
        #[serde(rename = "mentorId", default)]
        mentor_id: String,
        #[serde(default)]
        text: String,
    },
}

// =============================================================================
// OUTBOUND
// =============================================================================

/// Events the gateway pushes to subscribed clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    /// Chat message fanned out to every subscriber of the resolved room.
    #[serde(rename = "message")]
    Message {
        /// `userId` of the originator.
        sender: String,
        /// Opaque payload; never validated or sanitized.
        text: String,
        /// Capture time at the relay, ms since Unix epoch. Not client-supplied.
        timestamp: i64,
    },
}

impl ServerEvent {
    /// Chat message stamped with the relay clock.
    #[must_use]
    pub fn message(sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Message { sender: sender.into(), text: text.into(), timestamp: now_ms() }
    }
}

/// Current time as milliseconds since Unix epoch.
#[must_use]
pub fn now_ms() -> i64 {
    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(dur.as_millis()).unwrap_or(0)
}

#[cfg(test)]
#[path = "event_test.rs"]
mod tests;
