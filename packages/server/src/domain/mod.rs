//! ドメイン層
//!
//! リレーの中核となるモデル（接続・アイデンティティ・チャットメッセージ・履歴）と、
//! UseCase 層が依存するインターフェース（Repository, MessagePusher）を定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

pub mod entity;
pub mod error;
pub mod event;
pub mod factory;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use entity::{ChatMessage, Connection, ConnectionRegistry, ConnectionState, Identity, MessageHistory};
pub use error::{MessagePushError, RegistryError, RepositoryError, ValueObjectError};
pub use event::{RelayEvent, TypingIndicator};
pub use factory::{ConnectionIdFactory, MessageIdFactory};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::{ConnectionRepository, MessageHistoryRepository};
pub use value_object::{ConnectionId, MessageId, Timestamp};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
