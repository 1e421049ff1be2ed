//! Interactive terminal client for the campus chat relay.

mod domain;
mod error;
mod formatter;
mod runner;
mod session;
mod ui;

pub use domain::ClientIdentity;
pub use error::ClientError;
pub use runner::run_client;
