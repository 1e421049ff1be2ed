//! UseCase: 送信者だけへの返信（`pong` / `error`）
//!
//! どちらもブロードキャストせず、Registry や履歴も変更しない。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePushError, MessagePusher, RelayEvent};

/// 送信者への返信のユースケース
pub struct RespondToSenderUseCase {
    message_pusher: Arc<dyn MessagePusher>,
}

impl RespondToSenderUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// `ping` への応答
    pub async fn pong(&self, to: &ConnectionId) -> Result<(), MessagePushError> {
        self.message_pusher.push_to(to, &RelayEvent::Pong).await
    }

    /// 不正な入力への応答
    pub async fn reject(&self, to: &ConnectionId, message: &str) -> Result<(), MessagePushError> {
        let event = RelayEvent::Error {
            message: message.to_string(),
        };
        self.message_pusher.push_to(to, &event).await
    }
}
