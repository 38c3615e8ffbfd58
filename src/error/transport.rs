//! Transport error module.
//!
//! This module defines error types raised by the byte stream underneath the
//! RESP client.

use std::io;
use thiserror::Error;

/// Errors that can occur during transport operations.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Error when dialing the remote server.
    #[error("Failed to connect to {addr}: {source}")]
    Connect {
        /// The address that was dialed
        addr: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error when the dial did not complete within the connect timeout.
    #[error("Connecting to {addr} timed out after {timeout_ms} milliseconds")]
    ConnectTimeout {
        /// The address that was dialed
        addr: String,
        /// The configured connect timeout
        timeout_ms: u64,
    },

    /// Error when writing a request to the connection.
    #[error("Write error: {0}")]
    Write(#[source] io::Error),

    /// Error when reading a reply from the connection.
    #[error("Read error: {0}")]
    Read(#[source] io::Error),

    /// The peer closed the connection before a reply started.
    #[error("Connection closed by peer")]
    ConnectionClosed,

    /// A previous exchange failed midway, so request/reply pairing is lost.
    #[error("Connection is unusable after an earlier failure: {0}")]
    Poisoned(String),
}
