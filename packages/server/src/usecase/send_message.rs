//! UseCase: チャットメッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - ID とタイムスタンプの刻印、履歴への追記、送信者を含む全員へのブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 履歴の並びが受信順であり、ID が一意であることを保証する
//! - 送信者自身にもメッセージが届くこと（送信者除外ではないこと）を確認する
//!
//! ### どのような状況を想定しているか
//! - 正常系：複数接続へのブロードキャスト
//! - エッジケース：join していない接続からの送信、クライアントが id / timestamp を偽装

use std::sync::Arc;

use campus_relay_shared::time::Clock;
use serde_json::{Map, Value};

use crate::domain::{
    ChatMessage, ConnectionId, ConnectionRepository, MessageHistoryRepository, MessagePusher,
    RelayEvent, Timestamp,
};

use super::error::SendMessageError;

/// チャットメッセージ送信のユースケース
pub struct SendMessageUseCase {
    connections: Arc<dyn ConnectionRepository>,
    history: Arc<dyn MessageHistoryRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(
        connections: Arc<dyn ConnectionRepository>,
        history: Arc<dyn MessageHistoryRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            connections,
            history,
            message_pusher,
            clock,
        }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `from` - 送信元の接続 ID
    /// * `payload` - クライアントから受け取った不透明なメッセージオブジェクト
    ///
    /// # Returns
    ///
    /// * `Ok(ChatMessage)` - 刻印済みのメッセージ
    /// * `Err(SendMessageError)` - ブロードキャスト失敗（履歴には追記済み）
    pub async fn execute(
        &self,
        from: &ConnectionId,
        payload: Map<String, Value>,
    ) -> Result<ChatMessage, SendMessageError> {
        let received_at = Timestamp::new(self.clock.now_millis());

        // 1. 刻印して履歴に追記
        let message = self.history.append(payload, received_at).await;
        tracing::info!("Message '{}' received from '{}'", message.id, from);

        // 2. 送信者を含む全員にブロードキャスト
        let targets = self.connections.get_all_connection_ids().await;
        self.message_pusher
            .broadcast(targets, &RelayEvent::Message(message.clone()))
            .await?;

        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MessagePushError, MockMessagePusher},
        usecase::test_support::{TestRelay, drain, kinds},
    };
    use mockall::predicate::always;
    use serde_json::json;

    fn create_usecase(relay: &TestRelay) -> SendMessageUseCase {
        SendMessageUseCase::new(
            relay.connections.clone(),
            relay.history.clone(),
            relay.pusher.clone(),
            relay.clock.clone(),
        )
    }

    fn payload(content: &str) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("senderId".to_string(), json!("u1"));
        map.insert("recipientId".to_string(), json!("all"));
        map.insert("content".to_string(), json!(content));
        map
    }

    #[tokio::test]
    async fn test_send_message_reaches_everyone_including_sender() {
        // テスト項目: メッセージは送信者を含む全ての接続に 1 回ずつ届く
        // given (前提条件):
        let relay = TestRelay::new();
        let usecase = create_usecase(&relay);
        let (a, mut rx_a) = relay.open("a").await;
        let (_b, mut rx_b) = relay.open("b").await;
        let (_c, mut rx_c) = relay.open("c").await;

        // when (操作):
        let message = usecase.execute(&a, payload("hi")).await.unwrap();

        // then (期待する結果):
        for rx in [&mut rx_a, &mut rx_b, &mut rx_c] {
            let frames = drain(rx);
            assert_eq!(kinds(&frames), vec!["message"]);
            assert_eq!(frames[0]["message"]["content"], json!("hi"));
            assert_eq!(frames[0]["message"]["id"], json!(message.id.as_str()));
            assert_eq!(
                frames[0]["message"]["timestamp"],
                json!("2023-01-01T00:00:00.000Z")
            );
        }
        assert_eq!(relay.history.count_messages().await, 1);
    }

    #[tokio::test]
    async fn test_send_message_history_order_and_unique_ids() {
        // テスト項目: 履歴は受信順に並び、ID は一意、タイムスタンプは非減少
        // given (前提条件):
        let relay = TestRelay::new();
        let usecase = create_usecase(&relay);
        let (a, _rx_a) = relay.open("a").await;
        let (b, _rx_b) = relay.open("b").await;

        // when (操作):
        usecase.execute(&a, payload("1")).await.unwrap();
        usecase.execute(&b, payload("2")).await.unwrap();
        usecase.execute(&a, payload("3")).await.unwrap();

        // then (期待する結果):
        let history = relay.history.recent(10).await;
        let contents: Vec<_> = history.iter().map(|m| m.payload["content"].clone()).collect();
        assert_eq!(contents, vec![json!("1"), json!("2"), json!("3")]);
        assert_ne!(history[0].id, history[1].id);
        assert_ne!(history[1].id, history[2].id);
        assert!(history.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[tokio::test]
    async fn test_send_message_overrides_client_supplied_id_and_timestamp() {
        // テスト項目: クライアントが送った id / timestamp はサーバーの値で上書きされる
        // given (前提条件):
        let relay = TestRelay::new();
        let usecase = create_usecase(&relay);
        let (a, mut rx_a) = relay.open("a").await;
        let mut spoofed = payload("hi");
        spoofed.insert("id".to_string(), json!("client-id"));
        spoofed.insert("timestamp".to_string(), json!("1999-12-31T00:00:00Z"));

        // when (操作):
        usecase.execute(&a, spoofed).await.unwrap();

        // then (期待する結果):
        let frames = drain(&mut rx_a);
        assert_ne!(frames[0]["message"]["id"], json!("client-id"));
        assert_eq!(
            frames[0]["message"]["timestamp"],
            json!("2023-01-01T00:00:00.000Z")
        );
    }

    #[tokio::test]
    async fn test_send_message_from_unidentified_connection_is_relayed() {
        // テスト項目: join していない接続からのメッセージも中継される
        // given (前提条件):
        let relay = TestRelay::new();
        let usecase = create_usecase(&relay);
        let (a, mut rx_a) = relay.open("a").await;

        // when (操作):
        let result = usecase.execute(&a, payload("anonymous")).await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(kinds(&drain(&mut rx_a)), vec!["message"]);
    }

    #[tokio::test]
    async fn test_send_message_broadcast_failure_keeps_history() {
        // テスト項目: ブロードキャストに失敗してもメッセージは履歴に残る
        // given (前提条件):
        let relay = TestRelay::new();
        let (a, _rx_a) = relay.open("a").await;
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_broadcast()
            .with(always(), always())
            .times(1)
            .returning(|_, _| Err(MessagePushError::EncodeFailed("boom".to_string())));
        let usecase = SendMessageUseCase::new(
            relay.connections.clone(),
            relay.history.clone(),
            Arc::new(pusher),
            relay.clock.clone(),
        );

        // when (操作):
        let result = usecase.execute(&a, payload("hi")).await;

        // then (期待する結果):
        assert!(matches!(result, Err(SendMessageError::BroadcastFailed(_))));
        assert_eq!(relay.history.count_messages().await, 1);
    }
}
