//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, TypingIndicator},
    infrastructure::dto::websocket::{INVALID_MESSAGE_FORMAT, InboundError, InboundMessage},
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that drains this connection's channel into the WebSocket sink.
///
/// Frames arrive on the channel in the order the relay issued them, so the
/// socket sees them in that order too.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, mut receiver) = socket.split();

    // Create a channel for this connection to receive relay frames
    let (tx, rx) = mpsc::unbounded_channel();

    let connection_id = match state.connect_client_usecase.execute(tx).await {
        Ok(id) => id,
        Err(e) => {
            tracing::error!("Failed to accept connection: {}", e);
            return;
        }
    };
    tracing::info!("Connection '{}' accepted", connection_id);

    let mut send_task = pusher_loop(rx, sender);

    let state_clone = state.clone();
    let connection_id_clone = connection_id.clone();

    // Frames from one connection are handled strictly in arrival order
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!(
                        "WebSocket error on connection '{}': {}",
                        connection_id_clone,
                        e
                    );
                    break;
                }
            };

            let decoded = match msg {
                Message::Text(text) => InboundMessage::decode(text.as_str()),
                Message::Binary(bytes) => InboundMessage::decode_binary(&bytes),
                Message::Ping(_) | Message::Pong(_) => {
                    // Ping/pong frames are answered by the WebSocket protocol layer
                    continue;
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id_clone);
                    break;
                }
            };

            dispatch_inbound(&state_clone, &connection_id_clone, decoded).await;
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    match state.disconnect_client_usecase.execute(&connection_id).await {
        Ok(Some(user_id)) => {
            tracing::info!("Connection '{}' ({}) closed", connection_id, user_id);
        }
        Ok(None) => {}
        Err(e) => {
            tracing::warn!("Failed to unregister '{}': {}", connection_id, e);
        }
    }
}

/// Route one decoded inbound frame to its use case.
pub(crate) async fn dispatch_inbound(
    state: &AppState,
    from: &ConnectionId,
    decoded: Result<InboundMessage, InboundError>,
) {
    let inbound = match decoded {
        Ok(inbound) => inbound,
        Err(e) => {
            tracing::warn!("Rejected frame from '{}': {}", from, e);
            if let Err(e) = state
                .respond_to_sender_usecase
                .reject(from, INVALID_MESSAGE_FORMAT)
                .await
            {
                tracing::warn!("Failed to send error to '{}': {}", from, e);
            }
            return;
        }
    };
    tracing::debug!("Received '{}' from '{}'", inbound.kind(), from);

    match inbound {
        InboundMessage::UserJoin {
            user_id,
            user_name,
            user_role,
        } => {
            if let Err(e) = state
                .join_user_usecase
                .execute(from, user_id, user_name, user_role)
                .await
            {
                tracing::warn!("Join from '{}' failed: {}", from, e);
            }
        }
        InboundMessage::Message { message } => {
            if let Err(e) = state.send_message_usecase.execute(from, message).await {
                tracing::warn!("Failed to relay message from '{}': {}", from, e);
            }
        }
        InboundMessage::Typing {
            user_id,
            user_name,
            is_typing,
        } => {
            let indicator = TypingIndicator {
                user_id,
                user_name,
                is_typing,
            };
            if let Err(e) = state.notify_typing_usecase.execute(from, indicator).await {
                tracing::warn!("Failed to relay typing from '{}': {}", from, e);
            }
        }
        InboundMessage::Ping => {
            if let Err(e) = state.respond_to_sender_usecase.pong(from).await {
                tracing::warn!("Failed to send pong to '{}': {}", from, e);
            }
        }
        InboundMessage::Unknown => {
            tracing::debug!("Ignoring frame of unknown type from '{}'", from);
        }
    }
}
