//! Interactive terminal client for the campus chat relay.
//!
//! Connects, announces the user with `user_join`, prints history, presence,
//! chat and typing events, and sends each typed line as a chat message.
//! Automatically reconnects on disconnection (max 5 attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin campus-relay-client -- --user-id t1 --user-name "Ms. Tanaka" --user-role teacher
//! cargo run --bin campus-relay-client -- -i s42 -n Hana
//! ```

use campus_relay_client::{ClientIdentity, run_client};
use campus_relay_shared::logger::setup_logger;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "campus-relay-client")]
#[command(about = "Interactive client for the campus chat relay", long_about = None)]
struct Args {
    /// WebSocket relay URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:3001/ws")]
    url: String,

    /// User id announced on join
    #[arg(short = 'i', long)]
    user_id: String,

    /// Display name announced on join
    #[arg(short = 'n', long)]
    user_name: String,

    /// Role announced on join (e.g. student, teacher, parent, admin)
    #[arg(short = 'r', long, default_value = "student")]
    user_role: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();
    let identity = ClientIdentity {
        user_id: args.user_id,
        user_name: args.user_name,
        user_role: args.user_role,
    };

    if let Err(e) = run_client(args.url, identity).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
