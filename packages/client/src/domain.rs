//! Domain logic for client-side operations.
//!
//! Pure functions that decide what to send and whether to reconnect, kept
//! free of I/O so they are easy to test.

use campus_relay_server::infrastructure::dto::websocket::InboundMessage;
use serde_json::{Map, Value};

use crate::error::ClientError;

/// Who this client announces itself as on every (re)connect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIdentity {
    pub user_id: String,
    pub user_name: String,
    pub user_role: String,
}

impl ClientIdentity {
    /// `user_join` envelope sent right after connecting
    pub fn join_message(&self) -> InboundMessage {
        InboundMessage::UserJoin {
            user_id: self.user_id.clone(),
            user_name: self.user_name.clone(),
            user_role: self.user_role.clone(),
        }
    }
}

/// One line typed at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserInput {
    Chat(String),
    Typing(bool),
    Ping,
}

/// Interpret a prompt line. Blank lines yield `None`.
pub fn parse_input(line: &str) -> Option<UserInput> {
    let line = line.trim();
    match line {
        "" => None,
        "/typing" => Some(UserInput::Typing(true)),
        "/stop" => Some(UserInput::Typing(false)),
        "/ping" => Some(UserInput::Ping),
        _ => Some(UserInput::Chat(line.to_string())),
    }
}

/// Build the envelope for a prompt line.
pub fn build_outbound(input: UserInput, identity: &ClientIdentity) -> InboundMessage {
    match input {
        UserInput::Chat(content) => {
            let mut message = Map::new();
            message.insert("senderId".to_string(), Value::from(identity.user_id.clone()));
            message.insert(
                "senderName".to_string(),
                Value::from(identity.user_name.clone()),
            );
            message.insert("content".to_string(), Value::from(content));
            InboundMessage::Message { message }
        }
        UserInput::Typing(is_typing) => InboundMessage::Typing {
            user_id: identity.user_id.clone(),
            user_name: identity.user_name.clone(),
            is_typing,
        },
        UserInput::Ping => InboundMessage::Ping,
    }
}

/// Check if the client should exit immediately based on the error type.
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(error, ClientError::InvalidUrl(_))
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - The current reconnection attempt count (0-indexed)
/// * `max_attempts` - The maximum number of reconnection attempts allowed
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    if should_exit_immediately(error) {
        return false;
    }

    current_attempt < max_attempts
}
