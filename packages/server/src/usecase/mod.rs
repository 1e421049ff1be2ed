//! UseCase 層
//!
//! リレーの各操作を 1 つの UseCase として表現します。
//! UseCase は Repository と MessagePusher の trait にのみ依存します。

mod connect_client;
mod disconnect_client;
mod error;
mod get_health;
mod get_online_users;
mod join_user;
mod notify_typing;
mod respond_to_sender;
mod send_message;

#[cfg(test)]
mod test_support;

pub use connect_client::ConnectClientUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use error::{ConnectError, DisconnectError, JoinError, SendMessageError};
pub use get_health::{GetHealthUseCase, HealthStatus};
pub use get_online_users::GetOnlineUsersUseCase;
pub use join_user::{DEFAULT_HISTORY_REPLAY, JoinUserUseCase};
pub use notify_typing::NotifyTypingUseCase;
pub use respond_to_sender::RespondToSenderUseCase;
pub use send_message::SendMessageUseCase;
