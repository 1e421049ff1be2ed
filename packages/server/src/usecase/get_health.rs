//! UseCase: 死活監視

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use crate::domain::ConnectionRepository;

/// 死活監視の結果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthStatus {
    /// Registry に登録されている接続数
    pub connected_users: usize,
    /// プロセスの稼働時間
    pub uptime: Duration,
}

/// 死活監視のユースケース（副作用なし）
pub struct GetHealthUseCase {
    connections: Arc<dyn ConnectionRepository>,
    started_at: Instant,
}

impl GetHealthUseCase {
    /// 作成時刻を起動時刻として扱う
    pub fn new(connections: Arc<dyn ConnectionRepository>) -> Self {
        Self::with_started_at(connections, Instant::now())
    }

    pub fn with_started_at(connections: Arc<dyn ConnectionRepository>, started_at: Instant) -> Self {
        Self {
            connections,
            started_at,
        }
    }

    pub async fn execute(&self) -> HealthStatus {
        HealthStatus {
            connected_users: self.connections.count_connections().await,
            uptime: self.started_at.elapsed(),
        }
    }
}
