//! Server configuration (command-line flags with environment fallbacks).

use std::num::NonZeroUsize;

use clap::Parser;

use crate::usecase::DEFAULT_HISTORY_REPLAY;

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "campus-relay-server")]
#[command(about = "Real-time chat and presence relay over WebSocket", long_about = None)]
pub struct RelayConfig {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value_t = 3001)]
    pub port: u16,

    /// Maximum number of chat messages kept in history (oldest evicted first)
    #[arg(long, env = "HISTORY_CAPACITY", default_value = "500")]
    pub history_capacity: NonZeroUsize,

    /// Number of recent messages replayed to a user on join
    #[arg(long, env = "HISTORY_REPLAY", default_value_t = DEFAULT_HISTORY_REPLAY)]
    pub history_replay: usize,
}
