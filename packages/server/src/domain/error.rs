//! Domain error types.

use thiserror::Error;

/// Value object construction errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    /// Connection ID must not be empty
    #[error("connection id must not be empty")]
    EmptyConnectionId,

    /// Message ID must not be empty
    #[error("message id must not be empty")]
    EmptyMessageId,
}

/// Repository errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// The connection is not present in the registry
    #[error("connection '{0}' not found")]
    ConnectionNotFound(String),

    /// The connection is already present in the registry
    #[error("connection '{0}' is already registered")]
    DuplicateConnection(String),
}

/// Message push errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    /// No outbound channel is registered for the connection
    #[error("client '{0}' not found")]
    ClientNotFound(String),

    /// The outbound channel rejected the message (receiver dropped)
    #[error("failed to push message: {0}")]
    PushFailed(String),

    /// The event could not be encoded for the wire
    #[error("failed to encode event: {0}")]
    EncodeFailed(String),
}

/// Connection registry invariant violations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("connection '{0}' is already registered")]
    DuplicateConnection(String),

    #[error("connection '{0}' not found")]
    ConnectionNotFound(String),
}

impl From<RegistryError> for RepositoryError {
    fn from(error: RegistryError) -> Self {
        match error {
            RegistryError::DuplicateConnection(id) => Self::DuplicateConnection(id),
            RegistryError::ConnectionNotFound(id) => Self::ConnectionNotFound(id),
        }
    }
}
