//! Message formatting utilities for client display.

use campus_relay_server::infrastructure::dto::websocket::{ChatMessageDto, OutboundMessage};
use chrono::{DateTime, Utc};
use serde_json::Value;

const RULE: &str = "------------------------------------------------------------";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format any server frame. `me` is this client's user id.
    pub fn format_outbound(message: &OutboundMessage, me: &str) -> String {
        match message {
            OutboundMessage::Welcome { message } => format!("\n* {}\n", message),
            OutboundMessage::UserOnline {
                user_id,
                user_name,
                user_role,
            } => Self::format_user_online(user_id, user_name, user_role),
            OutboundMessage::UserOffline { user_id } => Self::format_user_offline(user_id),
            OutboundMessage::MessageHistory { messages } => Self::format_history(messages, me),
            OutboundMessage::Message { message } => Self::format_chat_message(message, me),
            OutboundMessage::Typing {
                user_name,
                is_typing,
                ..
            } => Self::format_typing(user_name, *is_typing),
            OutboundMessage::Pong => "\n* pong\n".to_string(),
            OutboundMessage::Error { message } => format!("\n! server error: {}\n", message),
        }
    }

    pub fn format_user_online(user_id: &str, user_name: &str, user_role: &str) -> String {
        format!("\n+ {} ({}, {}) is online\n", user_name, user_id, user_role)
    }

    pub fn format_user_offline(user_id: &str) -> String {
        format!("\n- {} went offline\n", user_id)
    }

    /// Replayed history, oldest first
    pub fn format_history(messages: &[ChatMessageDto], me: &str) -> String {
        let mut output = String::new();
        output.push_str("\n\n============================================================\n");
        output.push_str("Recent messages:\n");

        if messages.is_empty() {
            output.push_str("(No messages yet)\n");
        } else {
            for message in messages {
                output.push_str(&format!(
                    "[{}] {}: {}\n",
                    Self::format_timestamp(&message.timestamp),
                    Self::sender_label(message, me),
                    Self::content(message)
                ));
            }
        }

        output.push_str("============================================================\n");
        output
    }

    /// Format a chat message
    ///
    /// The payload is opaque to the relay, so missing `senderName` or
    /// `content` fields fall back to `senderId` and the raw payload.
    pub fn format_chat_message(message: &ChatMessageDto, me: &str) -> String {
        format!(
            "\n\n{}\n@{}: {}\nsent at {}\n{}\n",
            RULE,
            Self::sender_label(message, me),
            Self::content(message),
            Self::format_timestamp(&message.timestamp),
            RULE
        )
    }

    pub fn format_typing(user_name: &str, is_typing: bool) -> String {
        if is_typing {
            format!("\n... {} is typing\n", user_name)
        } else {
            format!("\n... {} stopped typing\n", user_name)
        }
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }

    /// RFC 3339 to `YYYY-MM-DD HH:MM:SS UTC`; unparseable input is shown as-is
    pub fn format_timestamp(timestamp: &str) -> String {
        match DateTime::parse_from_rfc3339(timestamp) {
            Ok(dt) => dt
                .with_timezone(&Utc)
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string(),
            Err(_) => timestamp.to_string(),
        }
    }

    fn sender_label(message: &ChatMessageDto, me: &str) -> String {
        let sender_id = message.payload.get("senderId").and_then(Value::as_str);
        let name = message
            .payload
            .get("senderName")
            .and_then(Value::as_str)
            .or(sender_id)
            .unwrap_or("unknown");
        if sender_id == Some(me) {
            format!("{} (me)", name)
        } else {
            name.to_string()
        }
    }

    fn content(message: &ChatMessageDto) -> String {
        match message.payload.get("content").and_then(Value::as_str) {
            Some(content) => content.to_string(),
            None => Value::Object(message.payload.clone()).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, json};

    fn chat(payload: Value) -> ChatMessageDto {
        let payload: Map<String, Value> = serde_json::from_value(payload).unwrap();
        ChatMessageDto {
            id: "1672531200000-0".to_string(),
            timestamp: "2023-01-01T00:00:00.000Z".to_string(),
            payload,
        }
    }

    #[test]
    fn test_format_chat_message_from_someone_else() {
        // テスト項目: 他人のメッセージは名前と本文と送信時刻で表示される
        // given (前提条件):
        let message = chat(json!({"senderId": "t1", "senderName": "Ms. Tanaka", "content": "Homework is due Friday"}));

        // when (操作):
        let result = MessageFormatter::format_chat_message(&message, "s42");

        // then (期待する結果):
        assert!(result.contains("@Ms. Tanaka: Homework is due Friday"));
        assert!(result.contains("sent at 2023-01-01 00:00:00 UTC"));
        assert!(!result.contains("(me)"));
    }

    #[test]
    fn test_format_chat_message_from_me() {
        // テスト項目: 自分のメッセージには (me) が付く
        // given (前提条件):
        let message = chat(json!({"senderId": "s42", "senderName": "Hana", "content": "ok"}));

        // when (操作):
        let result = MessageFormatter::format_chat_message(&message, "s42");

        // then (期待する結果):
        assert!(result.contains("@Hana (me): ok"));
    }

    #[test]
    fn test_format_chat_message_with_foreign_payload() {
        // テスト項目: content / senderName がない payload は senderId と生の JSON で表示される
        // given (前提条件):
        let message = chat(json!({"senderId": "web-7", "attachment": "report.pdf"}));

        // when (操作):
        let result = MessageFormatter::format_chat_message(&message, "s42");

        // then (期待する結果):
        assert!(result.contains("@web-7:"));
        assert!(result.contains("report.pdf"));
    }

    #[test]
    fn test_format_history_empty_and_ordered() {
        // テスト項目: 履歴が空なら案内を表示し、あれば古い順に並ぶ
        // given (前提条件):
        let messages = vec![
            chat(json!({"senderId": "a", "content": "first"})),
            chat(json!({"senderId": "b", "content": "second"})),
        ];

        // when (操作):
        let empty = MessageFormatter::format_history(&[], "s42");
        let filled = MessageFormatter::format_history(&messages, "s42");

        // then (期待する結果):
        assert!(empty.contains("(No messages yet)"));
        let first = filled.find("first").unwrap();
        let second = filled.find("second").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_format_outbound_presence_and_typing() {
        // テスト項目: プレゼンスと typing の通知が表示される
        // given (前提条件):
        let online = OutboundMessage::UserOnline {
            user_id: "p9".to_string(),
            user_name: "Mr. Sato".to_string(),
            user_role: "parent".to_string(),
        };
        let offline = OutboundMessage::UserOffline {
            user_id: "p9".to_string(),
        };
        let typing = OutboundMessage::Typing {
            user_id: "p9".to_string(),
            user_name: "Mr. Sato".to_string(),
            is_typing: true,
        };

        // when (操作):
        let results: Vec<_> = [online, offline, typing]
            .iter()
            .map(|m| MessageFormatter::format_outbound(m, "s42"))
            .collect();

        // then (期待する結果):
        assert!(results[0].contains("+ Mr. Sato (p9, parent) is online"));
        assert!(results[1].contains("- p9 went offline"));
        assert!(results[2].contains("Mr. Sato is typing"));
    }

    #[test]
    fn test_format_timestamp_falls_back_to_raw() {
        // テスト項目: 解釈できないタイムスタンプはそのまま表示される
        // given (前提条件):
        let timestamp = "yesterday";

        // when (操作):
        let result = MessageFormatter::format_timestamp(timestamp);

        // then (期待する結果):
        assert_eq!(result, "yesterday");
    }
}
