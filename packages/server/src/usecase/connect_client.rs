//! UseCase: 接続受付処理
//!
//! トランスポートが新しいセッションを受け付けた直後に呼ばれる。
//! アイデンティティなしで接続を登録し、その接続にだけ `welcome` を送る。

use std::sync::Arc;

use campus_relay_shared::time::Clock;

use crate::domain::{
    Connection, ConnectionId, ConnectionIdFactory, ConnectionRepository, MessagePusher,
    PusherChannel, RelayEvent, Timestamp,
};

use super::error::ConnectError;

/// 接続受付のユースケース
pub struct ConnectClientUseCase {
    /// Repository（接続レジストリの抽象化）
    repository: Arc<dyn ConnectionRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl ConnectClientUseCase {
    /// 新しい ConnectClientUseCase を作成
    pub fn new(
        repository: Arc<dyn ConnectionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            clock,
        }
    }

    /// 接続受付を実行
    ///
    /// # Arguments
    ///
    /// * `sender` - この接続へのメッセージ送信用チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(ConnectionId)` - 払い出した接続 ID
    /// * `Err(ConnectError)` - 登録失敗
    pub async fn execute(&self, sender: PusherChannel) -> Result<ConnectionId, ConnectError> {
        let connection_id = ConnectionIdFactory::generate()?;
        let connected_at = Timestamp::new(self.clock.now_millis());

        // 1. 送信チャンネルを先に登録（Registry のエントリは常に書き込み可能な送信先を持つ）
        self.message_pusher
            .register_client(connection_id.clone(), sender)
            .await;

        // 2. Registry に登録
        if let Err(e) = self
            .repository
            .register(Connection::new(connection_id.clone(), connected_at))
            .await
        {
            self.message_pusher.unregister_client(&connection_id).await;
            return Err(e.into());
        }

        // 3. 新しい接続にだけ welcome を送る
        if let Err(e) = self
            .message_pusher
            .push_to(&connection_id, &RelayEvent::Welcome)
            .await
        {
            tracing::warn!("Failed to send welcome to '{}': {}", connection_id, e);
        }

        Ok(connection_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::test_support::{TestRelay, drain};
    use serde_json::json;
    use tokio::sync::mpsc;

    fn create_usecase(relay: &TestRelay) -> ConnectClientUseCase {
        ConnectClientUseCase::new(
            relay.connections.clone(),
            relay.pusher.clone(),
            relay.clock.clone(),
        )
    }

    #[tokio::test]
    async fn test_connect_registers_unidentified_connection() {
        // テスト項目: 接続が登録され、アイデンティティはまだない
        // given (前提条件):
        let relay = TestRelay::new();
        let usecase = create_usecase(&relay);
        let (tx, _rx) = mpsc::unbounded_channel();

        // when (操作):
        let connection_id = usecase.execute(tx).await.unwrap();

        // then (期待する結果):
        assert_eq!(relay.connections.count_connections().await, 1);
        assert_eq!(
            relay.connections.get_all_connection_ids().await,
            vec![connection_id]
        );
        assert!(relay.connections.get_online_identities().await.is_empty());
    }

    #[tokio::test]
    async fn test_connect_sends_welcome_only_to_new_connection() {
        // テスト項目: welcome は新しい接続にだけ送られる
        // given (前提条件):
        let relay = TestRelay::new();
        let usecase = create_usecase(&relay);
        let (_existing, mut existing_rx) = relay.open("existing").await;
        let (tx, mut rx) = mpsc::unbounded_channel();

        // when (操作):
        usecase.execute(tx).await.unwrap();

        // then (期待する結果):
        assert_eq!(
            drain(&mut rx),
            vec![json!({"type": "welcome", "message": "Connected to chat server"})]
        );
        assert!(drain(&mut existing_rx).is_empty());
    }

    #[tokio::test]
    async fn test_connect_assigns_distinct_ids() {
        // テスト項目: 接続ごとに異なる ID が払い出される
        // given (前提条件):
        let relay = TestRelay::new();
        let usecase = create_usecase(&relay);
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();

        // when (操作):
        let id1 = usecase.execute(tx1).await.unwrap();
        let id2 = usecase.execute(tx2).await.unwrap();

        // then (期待する結果):
        assert_ne!(id1, id2);
        assert_eq!(relay.connections.count_connections().await, 2);
    }
}
