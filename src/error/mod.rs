//! Error module for bloomkit.
//!
//! Every fallible operation in the crate returns [`BloomResult`]. Errors are
//! grouped by the layer that produced them: argument validation, bit storage,
//! the transport underneath a remote store, the wire protocol on top of it,
//! caller cancellation, and configuration loading.

use std::fmt::{Display, Formatter};
use thiserror::Error;

pub mod config;
pub mod protocol;
pub mod transport;

pub use self::config::ConfigError;
pub use self::protocol::ProtocolError;
pub use self::transport::TransportError;

/// Result type alias used throughout bloomkit.
pub type BloomResult<T> = Result<T, BloomError>;

/// Core error enum for bloomkit.
#[derive(Error, Debug)]
pub enum BloomError {
    /// Bad sizing parameters or other invalid caller input.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A bit position whose byte offset cannot be addressed on this platform.
    #[error("Bit position {position} overflows the addressable byte range")]
    IndexOverflow {
        /// The offending bit position
        position: u64,
    },

    /// Connection, write or read failure against a remote store.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Malformed or unexpected reply framing, including server error replies.
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The caller's deadline passed or the caller cancelled the operation.
    #[error("Operation cancelled: {0}")]
    Cancelled(CancelReason),

    /// Errors occurring during configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl BloomError {
    /// Returns true if this error was caused by a deadline or a cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, BloomError::Cancelled(_))
    }

    /// Returns the server's message if this error is a server-side error reply.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            BloomError::Protocol(ProtocolError::Server(message)) => Some(message),
            _ => None,
        }
    }
}

/// Why an operation was cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// The context deadline elapsed.
    DeadlineExceeded,
    /// The caller signalled cancellation.
    Cancelled,
}

impl Display for CancelReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CancelReason::DeadlineExceeded => write!(f, "deadline exceeded"),
            CancelReason::Cancelled => write!(f, "cancelled by caller"),
        }
    }
}
