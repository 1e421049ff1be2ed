//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::{
    entity::{ChatMessage, Connection, Identity},
    error::RepositoryError,
    value_object::{ConnectionId, Timestamp},
};

/// 接続レジストリの Repository
#[async_trait]
pub trait ConnectionRepository: Send + Sync {
    /// アイデンティティなしで接続を登録
    async fn register(&self, connection: Connection) -> Result<(), RepositoryError>;

    /// アイデンティティを結び付ける（再 join の場合は以前の値を返す）
    async fn bind_identity(
        &self,
        connection_id: &ConnectionId,
        identity: Identity,
    ) -> Result<Option<Identity>, RepositoryError>;

    /// 接続を削除し、削除した接続を返す
    async fn unregister(&self, connection_id: &ConnectionId) -> Result<Connection, RepositoryError>;

    /// 接続中の全ての接続 ID を取得
    async fn get_all_connection_ids(&self) -> Vec<ConnectionId>;

    /// 指定した接続以外の全ての接続 ID を取得
    async fn get_connection_ids_except(&self, exclude: &ConnectionId) -> Vec<ConnectionId>;

    /// join 済みユーザーのアイデンティティ一覧
    async fn get_online_identities(&self) -> Vec<Identity>;

    /// 接続数を取得
    async fn count_connections(&self) -> usize;
}

/// チャット履歴の Repository
#[async_trait]
pub trait MessageHistoryRepository: Send + Sync {
    /// payload に ID とタイムスタンプを刻印して追記する（失敗しない）
    async fn append(&self, payload: Map<String, Value>, received_at: Timestamp) -> ChatMessage;

    /// 直近 `n` 件を受信順で取得
    async fn recent(&self, n: usize) -> Vec<ChatMessage>;

    /// 保持件数
    async fn count_messages(&self) -> usize;
}
