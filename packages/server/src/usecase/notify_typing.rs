//! UseCase: 入力中インジケーターの中継
//!
//! 送信者以外の全員へブロードキャストする。履歴には残さない。

use std::sync::Arc;

use crate::domain::{
    ConnectionId, ConnectionRepository, MessagePushError, MessagePusher, RelayEvent,
    TypingIndicator,
};

/// 入力中インジケーター中継のユースケース
pub struct NotifyTypingUseCase {
    connections: Arc<dyn ConnectionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl NotifyTypingUseCase {
    pub fn new(
        connections: Arc<dyn ConnectionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            connections,
            message_pusher,
        }
    }

    /// 送信者以外へ `typing` を送り、送信先の接続 ID リストを返す
    pub async fn execute(
        &self,
        from: &ConnectionId,
        indicator: TypingIndicator,
    ) -> Result<Vec<ConnectionId>, MessagePushError> {
        let targets = self.connections.get_connection_ids_except(from).await;
        self.message_pusher
            .broadcast(targets.clone(), &RelayEvent::Typing(indicator))
            .await?;
        Ok(targets)
    }
}
