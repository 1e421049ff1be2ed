//! Real-time chat and presence relay for the campus school-administration app.
//!
//! Clients connect over WebSocket, identify themselves, exchange chat messages
//! and typing indicators, and receive presence updates. Recent messages are
//! kept in a bounded in-memory history and replayed to users as they join.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
