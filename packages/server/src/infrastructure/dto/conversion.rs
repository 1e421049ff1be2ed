//! Conversion logic between DTOs and domain entities.

use crate::domain::{ChatMessage, Identity, RelayEvent};
use crate::infrastructure::dto::{
    http::OnlineUserDto,
    websocket::{self as dto, WELCOME_MESSAGE},
};

// ========================================
// Domain Entity → DTO
// ========================================

impl From<&ChatMessage> for dto::ChatMessageDto {
    fn from(model: &ChatMessage) -> Self {
        Self {
            id: model.id.as_str().to_string(),
            timestamp: model.timestamp.to_rfc3339(),
            payload: model.payload.clone(),
        }
    }
}

impl From<&RelayEvent> for dto::OutboundMessage {
    fn from(event: &RelayEvent) -> Self {
        match event {
            RelayEvent::Welcome => Self::Welcome {
                message: WELCOME_MESSAGE.to_string(),
            },
            RelayEvent::UserOnline(identity) => Self::UserOnline {
                user_id: identity.user_id.clone(),
                user_name: identity.user_name.clone(),
                user_role: identity.user_role.clone(),
            },
            RelayEvent::UserOffline { user_id } => Self::UserOffline {
                user_id: user_id.clone(),
            },
            RelayEvent::MessageHistory(messages) => Self::MessageHistory {
                messages: messages.iter().map(Into::into).collect(),
            },
            RelayEvent::Message(message) => Self::Message {
                message: message.into(),
            },
            RelayEvent::Typing(indicator) => Self::Typing {
                user_id: indicator.user_id.clone(),
                user_name: indicator.user_name.clone(),
                is_typing: indicator.is_typing,
            },
            RelayEvent::Pong => Self::Pong,
            RelayEvent::Error { message } => Self::Error {
                message: message.clone(),
            },
        }
    }
}

impl From<&Identity> for OnlineUserDto {
    fn from(identity: &Identity) -> Self {
        Self {
            user_id: identity.user_id.clone(),
            user_name: identity.user_name.clone(),
            user_role: identity.user_role.clone(),
            joined_at: identity.joined_at.to_rfc3339(),
        }
    }
}
