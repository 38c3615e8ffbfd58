//! Protocol error module.
//!
//! This module defines error types that may occur while decoding RESP replies
//! or interpreting their shape.

use thiserror::Error;

/// Errors that can occur during protocol operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// The server answered with an error reply (`-...`).
    #[error("server error: {0}")]
    Server(String),

    /// A reply started with a byte that is not a known RESP type marker.
    #[error("unknown reply type byte {byte:#04x}")]
    UnknownType {
        /// The offending byte
        byte: u8,
    },

    /// A length header could not be parsed or is out of range.
    #[error("invalid length header: {0:?}")]
    InvalidLength(String),

    /// An integer reply could not be parsed.
    #[error("invalid integer: {0:?}")]
    InvalidInteger(String),

    /// A line was not terminated by CRLF.
    #[error("line not terminated by CRLF: {0:?}")]
    MissingCrlf(String),

    /// Arrays were nested deeper than the decoder accepts.
    #[error("reply nested deeper than {limit} levels")]
    TooDeep {
        /// Maximum accepted nesting depth
        limit: usize,
    },

    /// The stream ended in the middle of a reply.
    #[error("truncated reply: {0}")]
    Truncated(String),

    /// The reply was well formed but not of the expected shape.
    #[error("unexpected reply: expected {expected}, got {got}")]
    UnexpectedReply {
        /// Description of the expected reply
        expected: String,
        /// Description of the reply that arrived
        got: String,
    },
}
