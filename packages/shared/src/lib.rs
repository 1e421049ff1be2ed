//! Utilities shared by the campus-relay server and client.

pub mod logger;
pub mod time;
