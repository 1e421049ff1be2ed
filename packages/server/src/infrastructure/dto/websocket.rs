//! WebSocket envelope DTOs.
//!
//! Every frame is a JSON object discriminated by its `type` field. Field names
//! inside the envelopes are camelCase to match the browser client.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Greeting sent on raw connect
pub const WELCOME_MESSAGE: &str = "Connected to chat server";

/// Error text sent back to a client whose frame could not be decoded
pub const INVALID_MESSAGE_FORMAT: &str = "Invalid message format";

/// Client → Server envelopes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum InboundMessage {
    UserJoin {
        user_id: String,
        user_name: String,
        user_role: String,
    },
    Message {
        message: Map<String, Value>,
    },
    Typing {
        user_id: String,
        user_name: String,
        is_typing: bool,
    },
    Ping,
    /// Any other `type` value; ignored by the relay
    #[serde(other)]
    Unknown,
}

/// Server → Client envelopes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum OutboundMessage {
    Welcome {
        message: String,
    },
    UserOnline {
        user_id: String,
        user_name: String,
        user_role: String,
    },
    UserOffline {
        user_id: String,
    },
    MessageHistory {
        messages: Vec<ChatMessageDto>,
    },
    Message {
        message: ChatMessageDto,
    },
    Typing {
        user_id: String,
        user_name: String,
        is_typing: bool,
    },
    Pong,
    Error {
        message: String,
    },
}

/// Stamped chat message: the client's payload plus server-assigned `id` and `timestamp`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessageDto {
    pub id: String,
    /// RFC 3339 (UTC, millisecond precision)
    pub timestamp: String,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

/// Reasons an inbound frame is rejected
#[derive(Debug, Error)]
pub enum InboundError {
    /// Binary frame that is not valid UTF-8
    #[error("frame is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// Not JSON, not an object, no `type`, or a known `type` with missing/mistyped fields
    #[error("malformed envelope: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl InboundMessage {
    /// Decode a text frame.
    pub fn decode(text: &str) -> Result<Self, InboundError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Decode a binary frame as UTF-8 JSON.
    pub fn decode_binary(bytes: &[u8]) -> Result<Self, InboundError> {
        Self::decode(std::str::from_utf8(bytes)?)
    }

    /// `type` tag for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserJoin { .. } => "user_join",
            Self::Message { .. } => "message",
            Self::Typing { .. } => "typing",
            Self::Ping => "ping",
            Self::Unknown => "unknown",
        }
    }
}
