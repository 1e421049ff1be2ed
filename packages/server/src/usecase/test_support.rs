//! UseCase テスト用のヘルパー
//!
//! 実際の InMemory Repository と WebSocketMessagePusher を組み立て、
//! 各接続の送信チャンネルに届いたフレームを JSON として取り出せるようにする。

use std::{collections::HashMap, num::NonZeroUsize, sync::Arc};

use campus_relay_shared::time::FixedClock;
use serde_json::Value;
use tokio::sync::{Mutex, mpsc};

use crate::{
    domain::{Connection, ConnectionId, ConnectionRepository, MessagePusher, Timestamp},
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryConnectionRepository, InMemoryMessageHistoryRepository},
    },
};

/// 2023-01-01T00:00:00.000Z
pub const FIXED_NOW: i64 = 1672531200000;

pub struct TestRelay {
    pub connections: Arc<InMemoryConnectionRepository>,
    pub history: Arc<InMemoryMessageHistoryRepository>,
    pub pusher: Arc<WebSocketMessagePusher>,
    pub clock: Arc<FixedClock>,
}

impl TestRelay {
    pub fn new() -> Self {
        Self {
            connections: Arc::new(InMemoryConnectionRepository::new()),
            history: Arc::new(InMemoryMessageHistoryRepository::new(
                NonZeroUsize::new(500).unwrap(),
            )),
            pusher: Arc::new(WebSocketMessagePusher::new(Arc::new(Mutex::new(
                HashMap::new(),
            )))),
            clock: Arc::new(FixedClock::new(FIXED_NOW)),
        }
    }

    /// 接続を直接登録し、その接続の受信側を返す（welcome は送らない）
    pub async fn open(&self, id: &str) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
        let connection_id = ConnectionId::new(id.to_string()).unwrap();
        let (tx, rx) = mpsc::unbounded_channel();
        self.pusher.register_client(connection_id.clone(), tx).await;
        self.connections
            .register(Connection::new(connection_id.clone(), Timestamp::new(FIXED_NOW)))
            .await
            .unwrap();
        (connection_id, rx)
    }
}

/// 受信済みのフレームを全て取り出して JSON にする
pub fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<Value> {
    let mut frames = Vec::new();
    while let Ok(frame) = rx.try_recv() {
        frames.push(serde_json::from_str(&frame).unwrap());
    }
    frames
}

/// フレームの `type` 一覧
pub fn kinds(frames: &[Value]) -> Vec<&str> {
    frames
        .iter()
        .map(|f| f["type"].as_str().unwrap_or_default())
        .collect()
}
