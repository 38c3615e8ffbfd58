// Copyright (c) 2025 Bloomkit Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Minimal RESP client.
//!
//! This module speaks the textual request/reply protocol of Redis: requests are
//! arrays of bulk strings, replies are typed by their first byte. It covers what
//! the remote bloom filter backend needs and little more: one request in flight
//! per connection, no pipelining, no pub/sub, no RESP3.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use bloomkit::context::Context;
//! use bloomkit::protocol::resp::{Command, RespClient};
//!
//! # async fn demo() -> bloomkit::error::BloomResult<()> {
//! let mut client = RespClient::connect("127.0.0.1:6379", Duration::from_secs(1)).await?;
//! let ctx = Context::with_timeout(Duration::from_secs(2));
//!
//! let reply = client.execute(&ctx, &Command::new("SET").arg("counter").arg(1)).await?;
//! assert_eq!(reply.into_string()?, "OK");
//!
//! let value = client.execute(&ctx, &Command::new("GET").arg("counter")).await?;
//! assert_eq!(value.as_i64()?, 1);
//! # Ok(())
//! # }
//! ```

mod bitfield;
mod client;
mod codec;
mod command;
mod reply;

#[cfg(test)]
mod tests;

pub use bitfield::{bitfield_command, parse_bitfield_reply, BitFieldOp};
pub use client::RespClient;
pub use codec::{read_reply, MAX_LINE_LEN, MAX_NESTING};
pub use command::{Command, ToArg};
pub use reply::Reply;

/// Line terminator for every header and payload.
pub(crate) const CRLF: &[u8; 2] = b"\r\n";

/// Largest bulk payload accepted from a server (the Redis default limit).
pub const MAX_BULK_LEN: usize = 512 * 1024 * 1024;
