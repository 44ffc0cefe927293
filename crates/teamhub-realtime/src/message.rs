//! Wire types for room sockets.
//!
//! Chat messages are typed; voice-signaling payloads are deliberately
//! opaque `serde_json::Value`s relayed verbatim — the server never
//! interprets WebRTC offers, answers, or ICE candidates.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Messages a chat client sends to the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChatInbound {
    /// A new chat message. Fields are optional on the wire; the handler
    /// ignores frames with missing or blank content.
    MessageSent {
        /// Message text.
        #[serde(default)]
        content: Option<String>,
        /// Sending user.
        #[serde(default)]
        user_id: Option<i64>,
    },
    /// Client keep-alive probe. Answered with a PONG to the sender only.
    Ping,
    /// Client answer to a probe. Ignored.
    Pong,
}

/// Events the server sends into a room.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomEvent {
    /// A chat message was persisted. `data` carries the stored record
    /// plus its sender summary.
    MessageSent {
        /// The persisted message view.
        data: Value,
    },
    /// Keep-alive answer.
    Pong,
    /// A member's connection ended.
    UserLeft,
    /// A file was uploaded to the project.
    FileUploaded {
        /// Acting user.
        user_id: i64,
        /// The file-with-latest-version view.
        data: Value,
    },
    /// A batch of files was uploaded to the project.
    FilesBatchUploaded {
        /// Acting user.
        user_id: i64,
        /// The list of file views.
        data: Value,
    },
    /// A file and all its versions were deleted.
    FileDeleted {
        /// Acting user.
        user_id: i64,
        /// `{ "id": file_id }`.
        data: Value,
    },
}

impl RoomEvent {
    /// Serialize to the JSON text frame sent over the socket.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inbound_message_parses() {
        let msg: ChatInbound =
            serde_json::from_str(r#"{"type":"MESSAGE_SENT","content":"hi","user_id":3}"#).unwrap();
        match msg {
            ChatInbound::MessageSent { content, user_id } => {
                assert_eq!(content.as_deref(), Some("hi"));
                assert_eq!(user_id, Some(3));
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn inbound_ping_parses_without_fields() {
        let msg: ChatInbound = serde_json::from_str(r#"{"type":"PING"}"#).unwrap();
        assert!(matches!(msg, ChatInbound::Ping));
    }

    #[test]
    fn inbound_message_tolerates_missing_fields() {
        let msg: ChatInbound = serde_json::from_str(r#"{"type":"MESSAGE_SENT"}"#).unwrap();
        match msg {
            ChatInbound::MessageSent { content, user_id } => {
                assert!(content.is_none());
                assert!(user_id.is_none());
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn outbound_envelope_mirrors_inbound_type() {
        let event = RoomEvent::MessageSent {
            data: serde_json::json!({"id": 1, "content": "hi"}),
        };
        let json: Value = serde_json::from_str(&event.to_json()).unwrap();
        assert_eq!(json["type"], "MESSAGE_SENT");
        assert_eq!(json["data"]["content"], "hi");

        let pong = RoomEvent::Pong.to_json();
        assert_eq!(pong, r#"{"type":"PONG"}"#);
    }
}
