//! UseCase error types.

use thiserror::Error;

use crate::domain::{MessagePushError, RepositoryError, ValueObjectError};

/// 接続受付の失敗
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    #[error("failed to generate connection id: {0}")]
    InvalidConnectionId(#[from] ValueObjectError),

    #[error("failed to register connection: {0}")]
    Registration(#[from] RepositoryError),
}

/// join の失敗（既に閉じた接続からの join など）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinError {
    #[error("failed to bind identity: {0}")]
    Repository(#[from] RepositoryError),
}

/// チャットメッセージ送信の失敗
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendMessageError {
    #[error("failed to broadcast message: {0}")]
    BroadcastFailed(#[from] MessagePushError),
}

/// 切断処理の失敗（既に登録解除済みなど）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisconnectError {
    #[error("failed to unregister connection: {0}")]
    Repository(#[from] RepositoryError),
}
