//! UseCase: 切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectClientUseCase::execute() メソッド
//! - Registry からの削除と、join 済みだった場合の `user_offline` ブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 切断した接続が Registry に残らないこと（ダングリングしないこと）を保証する
//! - join していない接続の切断では何も通知しないことを確認する
//!
//! ### どのような状況を想定しているか
//! - 正常系：join 済み接続の切断
//! - エッジケース：join していない接続の切断、最後の接続の切断
//! - 異常系：既に切断済みの接続

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionRepository, MessagePusher, RelayEvent};

use super::error::DisconnectError;

/// 切断のユースケース
pub struct DisconnectClientUseCase {
    connections: Arc<dyn ConnectionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectClientUseCase {
    /// 新しい DisconnectClientUseCase を作成
    pub fn new(
        connections: Arc<dyn ConnectionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            connections,
            message_pusher,
        }
    }

    /// 切断を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Some(user_id))` - join 済みだったため `user_offline` を送った
    /// * `Ok(None)` - join していなかったため通知なし
    /// * `Err(DisconnectError)` - 既に登録解除済み
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<Option<String>, DisconnectError> {
        // 1. Registry から削除してから送信チャンネルを外す
        let removed = self.connections.unregister(connection_id).await;
        self.message_pusher.unregister_client(connection_id).await;
        let connection = removed?;

        // 2. join 済みなら残りの全員に user_offline をブロードキャスト
        let Some(identity) = connection.identity else {
            tracing::info!("Unidentified connection '{}' closed", connection_id);
            return Ok(None);
        };

        let targets = self.connections.get_all_connection_ids().await;
        let event = RelayEvent::UserOffline {
            user_id: identity.user_id.clone(),
        };
        if let Err(e) = self.message_pusher.broadcast(targets, &event).await {
            tracing::warn!("Failed to broadcast user_offline: {}", e);
        }
        tracing::info!(
            "User '{}' went offline (connection '{}')",
            identity.user_id,
            connection_id
        );

        Ok(Some(identity.user_id))
    }

    /// 残りの接続数を取得
    pub async fn count_remaining_connections(&self) -> usize {
        self.connections.count_connections().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{Identity, RepositoryError, Timestamp},
        usecase::test_support::{TestRelay, drain},
    };
    use serde_json::json;

    fn create_usecase(relay: &TestRelay) -> DisconnectClientUseCase {
        DisconnectClientUseCase::new(relay.connections.clone(), relay.pusher.clone())
    }

    async fn bind(relay: &TestRelay, id: &ConnectionId, user_id: &str) {
        relay
            .connections
            .bind_identity(
                id,
                Identity::new(
                    user_id.to_string(),
                    user_id.to_string(),
                    "teacher".to_string(),
                    Timestamp::new(0),
                ),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_disconnect_identified_broadcasts_user_offline() {
        // テスト項目: join 済み接続の切断で、残りの全員に user_offline が 1 回ずつ届く
        // given (前提条件):
        let relay = TestRelay::new();
        let usecase = create_usecase(&relay);
        let (a, mut rx_a) = relay.open("a").await;
        let (_b, mut rx_b) = relay.open("b").await;
        let (_c, mut rx_c) = relay.open("c").await;
        bind(&relay, &a, "alice").await;

        // when (操作):
        let result = usecase.execute(&a).await;

        // then (期待する結果):
        assert_eq!(result, Ok(Some("alice".to_string())));
        let expected = json!({"type": "user_offline", "userId": "alice"});
        assert_eq!(drain(&mut rx_b), vec![expected.clone()]);
        assert_eq!(drain(&mut rx_c), vec![expected]);
        assert!(drain(&mut rx_a).is_empty());
        assert_eq!(usecase.count_remaining_connections().await, 2);
    }

    #[tokio::test]
    async fn test_disconnect_unidentified_sends_nothing() {
        // テスト項目: join していない接続の切断では何も通知しない
        // given (前提条件):
        let relay = TestRelay::new();
        let usecase = create_usecase(&relay);
        let (a, _rx_a) = relay.open("a").await;
        let (_b, mut rx_b) = relay.open("b").await;

        // when (操作):
        let result = usecase.execute(&a).await;

        // then (期待する結果):
        assert_eq!(result, Ok(None));
        assert!(drain(&mut rx_b).is_empty());
        assert_eq!(usecase.count_remaining_connections().await, 1);
    }

    #[tokio::test]
    async fn test_disconnect_last_connection() {
        // テスト項目: 最後の接続が切断すると Registry は空になる
        // given (前提条件):
        let relay = TestRelay::new();
        let usecase = create_usecase(&relay);
        let (a, _rx_a) = relay.open("a").await;
        bind(&relay, &a, "alice").await;

        // when (操作):
        let result = usecase.execute(&a).await;

        // then (期待する結果):
        assert_eq!(result, Ok(Some("alice".to_string())));
        assert_eq!(usecase.count_remaining_connections().await, 0);
    }

    #[tokio::test]
    async fn test_disconnect_twice_fails() {
        // テスト項目: 既に切断済みの接続を再度切断するとエラーになる
        // given (前提条件):
        let relay = TestRelay::new();
        let usecase = create_usecase(&relay);
        let (a, _rx_a) = relay.open("a").await;
        usecase.execute(&a).await.unwrap();

        // when (操作):
        let result = usecase.execute(&a).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(DisconnectError::Repository(
                RepositoryError::ConnectionNotFound("a".to_string())
            ))
        );
    }
}
