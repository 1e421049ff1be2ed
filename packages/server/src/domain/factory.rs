//! ID factories.

use uuid::Uuid;

use super::{
    error::ValueObjectError,
    value_object::{ConnectionId, MessageId, Timestamp},
};

/// ConnectionId を払い出すファクトリ（UUID v4）
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    pub fn generate() -> Result<ConnectionId, ValueObjectError> {
        ConnectionId::new(Uuid::new_v4().to_string())
    }
}

/// MessageId を払い出すファクトリ
///
/// `{受信時刻ミリ秒}-{通し番号}` の形式。通し番号は履歴ごとに単調増加するため、
/// 同一ミリ秒内に受信したメッセージでも一意かつ受信順に並ぶ。
pub struct MessageIdFactory;

impl MessageIdFactory {
    pub fn from_sequence(received_at: Timestamp, sequence: u64) -> MessageId {
        MessageId(format!("{}-{}", received_at.value(), sequence))
    }
}
