//! Chat and presence relay server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin campus-relay-server
//! cargo run --bin campus-relay-server -- --host 127.0.0.1 --port 3001
//! HISTORY_CAPACITY=1000 cargo run --bin campus-relay-server
//! ```

use std::sync::Arc;

use campus_relay_server::{
    config::RelayConfig,
    ui::{AppState, Server},
};
use campus_relay_shared::{logger::setup_logger, time::SystemClock};
use clap::Parser;

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let config = RelayConfig::parse();
    tracing::info!(
        "History capacity {}, replaying {} messages on join",
        config.history_capacity,
        config.history_replay
    );

    // 1. Wire repositories, MessagePusher and UseCases
    let state = AppState::in_memory(&config, Arc::new(SystemClock));

    // 2. Create and run the server
    let server = Server::new(state);
    if let Err(e) = server.run(config.host, config.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
