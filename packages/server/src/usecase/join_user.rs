//! UseCase: ユーザー join 処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinUserUseCase::execute() メソッド
//! - アイデンティティの設定、`user_online` のブロードキャスト、`message_history` の返信
//!
//! ### なぜこのテストが必要か
//! - join した本人には履歴だけ、他の全員には `user_online` だけが届くことを保証する
//! - 再 join でも毎回 `user_online` が送られることを確認する
//!
//! ### どのような状況を想定しているか
//! - 正常系：初回 join、再 join
//! - エッジケース：履歴が 50 件を超えている、履歴が空
//! - 異常系：既に閉じた接続からの join

use std::sync::Arc;

use campus_relay_shared::time::Clock;

use crate::domain::{
    ConnectionId, ConnectionRepository, Identity, MessageHistoryRepository, MessagePusher,
    RelayEvent, Timestamp,
};

use super::error::JoinError;

/// join した本人へ返す履歴の件数
pub const DEFAULT_HISTORY_REPLAY: usize = 50;

/// ユーザー join のユースケース
pub struct JoinUserUseCase {
    connections: Arc<dyn ConnectionRepository>,
    history: Arc<dyn MessageHistoryRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
    replay_limit: usize,
}

impl JoinUserUseCase {
    /// 新しい JoinUserUseCase を作成（履歴の返信件数は `DEFAULT_HISTORY_REPLAY`）
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
            replay_limit: DEFAULT_HISTORY_REPLAY,
        }
    }

    /// 履歴の返信件数を変更
    pub fn with_replay_limit(mut self, replay_limit: usize) -> Self {
        self.replay_limit = replay_limit;
        self
    }

    /// join を実行
    ///
    /// アイデンティティの値は検証しない（空文字列でも受け入れる）。
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ConnectionId>)` - `user_online` を送った接続 ID リスト
    /// * `Err(JoinError)` - 接続が既に存在しない
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        user_id: String,
        user_name: String,
        user_role: String,
    ) -> Result<Vec<ConnectionId>, JoinError> {
        let joined_at = Timestamp::new(self.clock.now_millis());
        let identity = Identity::new(user_id, user_name, user_role, joined_at);

        // 1. アイデンティティを設定（再 join なら上書き）
        if let Some(previous) = self
            .connections
            .bind_identity(connection_id, identity.clone())
            .await?
        {
            tracing::debug!(
                "Connection '{}' re-joined (was '{}')",
                connection_id,
                previous.user_id
            );
        }
        tracing::info!(
            "User '{}' ({}) joined on connection '{}'",
            identity.user_id,
            identity.user_role,
            connection_id
        );

        // 2. 本人以外の全員に user_online をブロードキャスト
        let targets = self
            .connections
            .get_connection_ids_except(connection_id)
            .await;
        if let Err(e) = self
            .message_pusher
            .broadcast(targets.clone(), &RelayEvent::UserOnline(identity))
            .await
        {
            tracing::warn!("Failed to broadcast user_online: {}", e);
        }

        // 3. 本人にだけ直近の履歴を返す
        let messages = self.history.recent(self.replay_limit).await;
        if let Err(e) = self
            .message_pusher
            .push_to(connection_id, &RelayEvent::MessageHistory(messages))
            .await
        {
            tracing::warn!("Failed to send message_history to '{}': {}", connection_id, e);
        }

        Ok(targets)
    }
}
