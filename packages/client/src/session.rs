//! WebSocket client session management.

use campus_relay_server::infrastructure::dto::websocket::OutboundMessage;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{self, protocol::Message},
};

use crate::{
    domain::{ClientIdentity, build_outbound, parse_input},
    error::ClientError,
};

use super::{formatter::MessageFormatter, ui::redisplay_prompt};

/// Run one connection to the relay.
///
/// Returns `Ok(())` when the user ends input, or an error when the connection
/// could not be opened or was lost.
pub async fn run_client_session(
    url: &str,
    identity: &ClientIdentity,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url).await.map_err(|e| match e {
        tungstenite::Error::Url(_) => ClientError::InvalidUrl(url.to_string()),
        e => ClientError::ConnectionError(e.to_string()),
    })?;

    tracing::info!("Connected to chat relay!");
    println!(
        "\nYou are '{}' ({}). Type messages and press Enter to send.\n\
         Commands: /typing, /stop, /ping. Press Ctrl+C to exit.\n",
        identity.user_name, identity.user_role
    );

    let (mut write, mut read) = ws_stream.split();

    // Announce ourselves; the relay answers with the recent history
    let join = serde_json::to_string(&identity.join_message())?;
    write
        .send(Message::Text(join.into()))
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    let me = identity.user_id.clone();
    let prompt_name = identity.user_name.clone();

    // Spawn a task to handle incoming frames
    let mut read_task = tokio::spawn(async move {
        while let Some(frame) = read.next().await {
            match frame {
                Ok(Message::Text(text)) => {
                    let formatted = match serde_json::from_str::<OutboundMessage>(text.as_str()) {
                        Ok(message) => MessageFormatter::format_outbound(&message, &me),
                        Err(_) => MessageFormatter::format_raw_message(text.as_str()),
                    };
                    print!("{}", formatted);
                    redisplay_prompt(&prompt_name);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    break;
                }
                Ok(_) => {}
            }
        }
    });

    let write_loop = async {
        while let Some(line) = input_rx.recv().await {
            let Some(input) = parse_input(&line) else {
                continue;
            };
            let json = serde_json::to_string(&build_outbound(input, identity))?;
            write
                .send(Message::Text(json.into()))
                .await
                .map_err(|e| ClientError::ConnectionError(e.to_string()))?;
        }
        Ok::<(), ClientError>(())
    };

    // Whichever side finishes first ends the session
    let outcome = tokio::select! {
        _ = &mut read_task => Err(ClientError::ConnectionError("Connection lost".to_string())),
        result = write_loop => result,
    };
    read_task.abort();

    if outcome.is_ok() {
        write.close().await.ok();
    }

    outcome
}
