//! Domain entities
//!
//! - `Connection` / `ConnectionRegistry`: 接続と、そこに結び付いたアイデンティティ
//! - `ChatMessage` / `MessageHistory`: 受信順に並んだチャット履歴
//!
//! いずれも副作用を持たない純粋なモデルで、排他制御は Repository 実装が担う。

use std::{collections::VecDeque, num::NonZeroUsize};

use serde_json::{Map, Value};

use super::{
    error::RegistryError,
    factory::MessageIdFactory,
    value_object::{ConnectionId, MessageId, Timestamp},
};

/// クライアントが `user_join` で名乗ったアイデンティティ
///
/// 値の検証は行わない（空文字列もそのまま受け入れる）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub user_name: String,
    pub user_role: String,
    pub joined_at: Timestamp,
}

impl Identity {
    pub fn new(user_id: String, user_name: String, user_role: String, joined_at: Timestamp) -> Self {
        Self {
            user_id,
            user_name,
            user_role,
            joined_at,
        }
    }
}

/// 接続の状態（CLOSED は Registry に存在しないことで表現する）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    OpenUnidentified,
    OpenIdentified,
}

/// 1 本の生きている接続
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub id: ConnectionId,
    pub connected_at: Timestamp,
    pub identity: Option<Identity>,
}

impl Connection {
    /// アイデンティティ未設定の接続を作成
    pub fn new(id: ConnectionId, connected_at: Timestamp) -> Self {
        Self {
            id,
            connected_at,
            identity: None,
        }
    }

    /// アイデンティティを設定（既存のものは上書きし、返す）
    pub fn bind(&mut self, identity: Identity) -> Option<Identity> {
        self.identity.replace(identity)
    }

    pub fn state(&self) -> ConnectionState {
        match self.identity {
            Some(_) => ConnectionState::OpenIdentified,
            None => ConnectionState::OpenUnidentified,
        }
    }
}

/// 接続レジストリ
///
/// 登録順を保持する。ブロードキャストの順序に意味はないが、テストで結果を
/// 決定的にするため `Vec` で管理する。
#[derive(Debug, Clone, Default)]
pub struct ConnectionRegistry {
    connections: Vec<Connection>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 接続を登録（アイデンティティなし）
    pub fn register(&mut self, connection: Connection) -> Result<(), RegistryError> {
        if self.contains(&connection.id) {
            return Err(RegistryError::DuplicateConnection(
                connection.id.into_string(),
            ));
        }
        self.connections.push(connection);
        Ok(())
    }

    /// アイデンティティを結び付ける。再 join の場合は以前のアイデンティティを返す
    pub fn bind(
        &mut self,
        id: &ConnectionId,
        identity: Identity,
    ) -> Result<Option<Identity>, RegistryError> {
        let connection = self
            .connections
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| RegistryError::ConnectionNotFound(id.as_str().to_string()))?;
        Ok(connection.bind(identity))
    }

    /// 接続を削除し、削除した接続を返す
    pub fn unregister(&mut self, id: &ConnectionId) -> Result<Connection, RegistryError> {
        let index = self
            .connections
            .iter()
            .position(|c| &c.id == id)
            .ok_or_else(|| RegistryError::ConnectionNotFound(id.as_str().to_string()))?;
        Ok(self.connections.remove(index))
    }

    pub fn get(&self, id: &ConnectionId) -> Option<&Connection> {
        self.connections.iter().find(|c| &c.id == id)
    }

    pub fn contains(&self, id: &ConnectionId) -> bool {
        self.get(id).is_some()
    }

    /// 登録順の接続 ID 一覧
    pub fn connection_ids(&self) -> Vec<ConnectionId> {
        self.connections.iter().map(|c| c.id.clone()).collect()
    }

    /// 指定した接続以外の接続 ID 一覧
    pub fn connection_ids_except(&self, exclude: &ConnectionId) -> Vec<ConnectionId> {
        self.connections
            .iter()
            .filter(|c| &c.id != exclude)
            .map(|c| c.id.clone())
            .collect()
    }

    /// オンライン（join 済み）のアイデンティティ一覧
    pub fn identities(&self) -> Vec<Identity> {
        self.connections
            .iter()
            .filter_map(|c| c.identity.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

/// サーバーが採番・刻印したチャットメッセージ
///
/// `payload` はクライアントから受け取った不透明なオブジェクト。
/// `id` と `timestamp` はサーバーの値が常に優先されるため、payload 側の同名キーは取り除く。
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub timestamp: Timestamp,
    pub payload: Map<String, Value>,
}

impl ChatMessage {
    pub fn stamp(id: MessageId, timestamp: Timestamp, mut payload: Map<String, Value>) -> Self {
        payload.remove("id");
        payload.remove("timestamp");
        Self {
            id,
            timestamp,
            payload,
        }
    }
}

/// チャット履歴バッファ
///
/// 追記のみ・受信順。保持件数が `capacity` に達すると最も古いメッセージから破棄する。
#[derive(Debug, Clone)]
pub struct MessageHistory {
    messages: VecDeque<ChatMessage>,
    capacity: NonZeroUsize,
    next_sequence: u64,
    last_timestamp: Option<Timestamp>,
}

impl MessageHistory {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            messages: VecDeque::new(),
            capacity,
            next_sequence: 1,
            last_timestamp: None,
        }
    }

    /// payload に ID とタイムスタンプを刻印して末尾に追加し、刻印済みメッセージを返す
    ///
    /// タイムスタンプは直前のメッセージより小さくならないよう切り上げる（時計の巻き戻り対策）。
    pub fn append(&mut self, payload: Map<String, Value>, received_at: Timestamp) -> ChatMessage {
        let timestamp = match self.last_timestamp {
            Some(last) if last > received_at => last,
            _ => received_at,
        };
        let id = MessageIdFactory::from_sequence(timestamp, self.next_sequence);
        self.next_sequence += 1;
        self.last_timestamp = Some(timestamp);

        let message = ChatMessage::stamp(id, timestamp, payload);
        if self.messages.len() == self.capacity.get() {
            self.messages.pop_front();
        }
        self.messages.push_back(message.clone());
        message
    }

    /// 直近 `n` 件を受信順で返す（履歴が短ければその分だけ）
    pub fn recent(&self, n: usize) -> Vec<ChatMessage> {
        let skip = self.messages.len().saturating_sub(n);
        self.messages.iter().skip(skip).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
