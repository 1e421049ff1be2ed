//! InMemory Message History Repository 実装
//!
//! 刻印（ID・タイムスタンプの付与）と追記を同じロックの中で行うため、
//! 履歴の並びがそのまま受信順の正とみなせる。

use std::num::NonZeroUsize;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use crate::domain::{ChatMessage, MessageHistory, MessageHistoryRepository, Timestamp};

/// インメモリ Message History Repository 実装
pub struct InMemoryMessageHistoryRepository {
    history: Mutex<MessageHistory>,
}

impl InMemoryMessageHistoryRepository {
    /// 保持上限 `capacity` 件の履歴を作成
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            history: Mutex::new(MessageHistory::new(capacity)),
        }
    }
}

#[async_trait]
impl MessageHistoryRepository for InMemoryMessageHistoryRepository {
    async fn append(&self, payload: Map<String, Value>, received_at: Timestamp) -> ChatMessage {
        let mut history = self.history.lock().await;
        let message = history.append(payload, received_at);
        tracing::debug!(
            message_id = %message.id,
            stored = history.len(),
            "Appended message to history"
        );
        message
    }

    async fn recent(&self, n: usize) -> Vec<ChatMessage> {
        let history = self.history.lock().await;
        history.recent(n)
    }

    async fn count_messages(&self) -> usize {
        let history = self.history.lock().await;
        history.len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use serde_json::json;

    fn payload(n: usize) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("content".to_string(), json!(format!("m{}", n)));
        map
    }

    #[tokio::test]
    async fn test_append_and_recent() {
        // テスト項目: 追記したメッセージを直近から取得できる
        // given (前提条件):
        let repository = InMemoryMessageHistoryRepository::new(NonZeroUsize::new(500).unwrap());

        // when (操作):
        for n in 0..3 {
            repository.append(payload(n), Timestamp::new(100)).await;
        }

        // then (期待する結果):
        let recent = repository.recent(2).await;
        assert_eq!(repository.count_messages().await, 3);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].payload["content"], json!("m1"));
        assert_eq!(recent[1].payload["content"], json!("m2"));
    }

    #[tokio::test]
    async fn test_concurrent_appends_get_unique_ordered_ids() {
        // テスト項目: 並行に追記しても ID は一意で、履歴のタイムスタンプは非減少
        // given (前提条件):
        let repository = Arc::new(InMemoryMessageHistoryRepository::new(
            NonZeroUsize::new(500).unwrap(),
        ));

        // when (操作):
        let mut handles = Vec::new();
        for n in 0..20 {
            let repository = repository.clone();
            handles.push(tokio::spawn(async move {
                repository
                    .append(payload(n), Timestamp::new(1000 + (n as i64 % 3)))
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        // then (期待する結果):
        let history = repository.recent(100).await;
        assert_eq!(history.len(), 20);
        let mut ids: Vec<_> = history.iter().map(|m| m.id.as_str().to_string()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 20);
        assert!(history.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }
}
