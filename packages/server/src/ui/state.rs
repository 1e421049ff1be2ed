//! Shared application state.

use std::{collections::HashMap, sync::Arc};

use campus_relay_shared::time::Clock;
use tokio::sync::Mutex;

use crate::{
    config::RelayConfig,
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryConnectionRepository, InMemoryMessageHistoryRepository},
    },
    usecase::{
        ConnectClientUseCase, DisconnectClientUseCase, GetHealthUseCase, GetOnlineUsersUseCase,
        JoinUserUseCase, NotifyTypingUseCase, RespondToSenderUseCase, SendMessageUseCase,
    },
};

/// Use cases shared by every handler
pub struct AppState {
    /// ConnectClientUseCase（接続受付）
    pub connect_client_usecase: Arc<ConnectClientUseCase>,
    /// JoinUserUseCase（ユーザー join）
    pub join_user_usecase: Arc<JoinUserUseCase>,
    /// SendMessageUseCase（チャットメッセージ送信）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// NotifyTypingUseCase（入力中インジケーター）
    pub notify_typing_usecase: Arc<NotifyTypingUseCase>,
    /// RespondToSenderUseCase（pong / error の返信）
    pub respond_to_sender_usecase: Arc<RespondToSenderUseCase>,
    /// DisconnectClientUseCase（切断）
    pub disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    /// GetHealthUseCase（死活監視）
    pub get_health_usecase: Arc<GetHealthUseCase>,
    /// GetOnlineUsersUseCase（オンラインユーザー一覧）
    pub get_online_users_usecase: Arc<GetOnlineUsersUseCase>,
}

impl AppState {
    /// Wire every use case against in-memory repositories.
    pub fn in_memory(config: &RelayConfig, clock: Arc<dyn Clock>) -> Self {
        // Initialize dependencies in order:
        // 1. Repositories
        // 2. MessagePusher
        // 3. UseCases

        // 1. Create Repositories (in-memory registry and history)
        let connections = Arc::new(InMemoryConnectionRepository::new());
        let history = Arc::new(InMemoryMessageHistoryRepository::new(
            config.history_capacity,
        ));

        // 2. Create MessagePusher (WebSocket implementation)
        let message_pusher_clients = Arc::new(Mutex::new(HashMap::new()));
        let message_pusher = Arc::new(WebSocketMessagePusher::new(message_pusher_clients));

        // 3. Create UseCases
        Self {
            connect_client_usecase: Arc::new(ConnectClientUseCase::new(
                connections.clone(),
                message_pusher.clone(),
                clock.clone(),
            )),
            join_user_usecase: Arc::new(
                JoinUserUseCase::new(
                    connections.clone(),
                    history.clone(),
                    message_pusher.clone(),
                    clock.clone(),
                )
                .with_replay_limit(config.history_replay),
            ),
            send_message_usecase: Arc::new(SendMessageUseCase::new(
                connections.clone(),
                history,
                message_pusher.clone(),
                clock,
            )),
            notify_typing_usecase: Arc::new(NotifyTypingUseCase::new(
                connections.clone(),
                message_pusher.clone(),
            )),
            respond_to_sender_usecase: Arc::new(RespondToSenderUseCase::new(
                message_pusher.clone(),
            )),
            disconnect_client_usecase: Arc::new(DisconnectClientUseCase::new(
                connections.clone(),
                message_pusher,
            )),
            get_health_usecase: Arc::new(GetHealthUseCase::new(connections.clone())),
            get_online_users_usecase: Arc::new(GetOnlineUsersUseCase::new(connections)),
        }
    }
}
