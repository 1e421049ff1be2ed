//! Outbound relay events.
//!
//! UseCase 層はこの列挙型でクライアントへの通知内容を表現し、
//! ワイヤ形式（JSON）への変換は Infrastructure 層の MessagePusher が担う。

use super::entity::{ChatMessage, Identity};

/// 入力中インジケーター（送信者の申告した値をそのまま中継する）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingIndicator {
    pub user_id: String,
    pub user_name: String,
    pub is_typing: bool,
}

/// クライアントへ送るイベント
#[derive(Debug, Clone, PartialEq)]
pub enum RelayEvent {
    /// 接続直後に新しい接続へだけ送る挨拶
    Welcome,
    /// ユーザーが join した（join した本人以外へ）
    UserOnline(Identity),
    /// join 済みのユーザーが切断した
    UserOffline { user_id: String },
    /// join した本人へ返す直近の履歴
    MessageHistory(Vec<ChatMessage>),
    /// チャットメッセージ（送信者を含む全員へ）
    Message(ChatMessage),
    /// 入力中インジケーター（送信者以外へ）
    Typing(TypingIndicator),
    Pong,
    /// 不正な入力に対する送信者だけへのエラー通知
    Error { message: String },
}

impl RelayEvent {
    /// ログ出力用のイベント種別名
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Welcome => "welcome",
            Self::UserOnline(_) => "user_online",
            Self::UserOffline { .. } => "user_offline",
            Self::MessageHistory(_) => "message_history",
            Self::Message(_) => "message",
            Self::Typing(_) => "typing",
            Self::Pong => "pong",
            Self::Error { .. } => "error",
        }
    }
}
