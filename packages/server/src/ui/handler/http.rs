//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    infrastructure::dto::http::{HealthResponseDto, OnlineUserDto},
    ui::state::AppState,
};

/// Liveness endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponseDto> {
    let status = state.get_health_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(HealthResponseDto {
        status: "ok".to_string(),
        connected_users: status.connected_users,
        uptime: status.uptime.as_secs_f64(),
    })
}

/// Identified users currently online
pub async fn get_online_users(State(state): State<Arc<AppState>>) -> Json<Vec<OnlineUserDto>> {
    let identities = state.get_online_users_usecase.execute().await;
    Json(identities.iter().map(OnlineUserDto::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RelayConfig;
    use campus_relay_shared::time::FixedClock;
    use std::num::NonZeroUsize;
    use tokio::sync::mpsc;

    fn create_state() -> Arc<AppState> {
        let config = RelayConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            history_capacity: NonZeroUsize::new(500).unwrap(),
            history_replay: 50,
        };
        Arc::new(AppState::in_memory(
            &config,
            Arc::new(FixedClock::new(1672531200000)),
        ))
    }

    #[tokio::test]
    async fn test_health_check_counts_unidentified_connections() {
        // テスト項目: connectedUsers は join していない接続も数える
        // given (前提条件):
        let state = create_state();
        let (tx, _rx) = mpsc::unbounded_channel();
        state.connect_client_usecase.execute(tx).await.unwrap();

        // when (操作):
        let Json(body) = health_check(State(state)).await;

        // then (期待する結果):
        assert_eq!(body.status, "ok");
        assert_eq!(body.connected_users, 1);
        assert!(body.uptime >= 0.0);
    }

    #[tokio::test]
    async fn test_get_online_users_lists_joined_users() {
        // テスト項目: join 済みのユーザーだけが一覧に含まれる
        // given (前提条件):
        let state = create_state();
        let (tx_a, _rx_a) = mpsc::unbounded_channel();
        let (tx_b, _rx_b) = mpsc::unbounded_channel();
        let a = state.connect_client_usecase.execute(tx_a).await.unwrap();
        state.connect_client_usecase.execute(tx_b).await.unwrap();
        state
            .join_user_usecase
            .execute(
                &a,
                "t1".to_string(),
                "Ms. Tanaka".to_string(),
                "teacher".to_string(),
            )
            .await
            .unwrap();

        // when (操作):
        let Json(users) = get_online_users(State(state)).await;

        // then (期待する結果):
        assert_eq!(
            users,
            vec![OnlineUserDto {
                user_id: "t1".to_string(),
                user_name: "Ms. Tanaka".to_string(),
                user_role: "teacher".to_string(),
                joined_at: "2023-01-01T00:00:00.000Z".to_string(),
            }]
        );
    }
}
