// Copyright (c) 2025 Bloomkit Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! RESP client over an async byte stream.

use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufStream};
use tokio::net::TcpStream;
use tracing::{debug, info, trace, warn};

use super::bitfield::{bitfield_command, parse_bitfield_reply, BitFieldOp};
use super::codec;
use super::command::Command;
use super::reply::Reply;
use crate::context::Context;
use crate::error::{BloomError, BloomResult, ProtocolError, TransportError};

/// A request/reply client for one RESP connection.
///
/// The client is not internally synchronized: `execute` takes `&mut self`, so
/// only one request is ever in flight on the connection. Share a client between
/// tasks by wrapping it in a `tokio::sync::Mutex`.
///
/// If an exchange is interrupted (cancellation, I/O failure, or a reply that
/// cannot be framed) the position of the next reply on the stream is unknown.
/// The client then refuses further requests with [`TransportError::Poisoned`].
#[derive(Debug)]
pub struct RespClient<S> {
    stream: BufStream<S>,
    peer: String,
    poisoned: Option<String>,
}

impl RespClient<TcpStream> {
    /// Dials `addr` over TCP, giving up after `connect_timeout`.
    pub async fn connect(addr: &str, connect_timeout: Duration) -> BloomResult<Self> {
        let stream = match tokio::time::timeout(connect_timeout, TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(source)) => {
                return Err(TransportError::Connect {
                    addr: addr.to_string(),
                    source,
                }
                .into())
            }
            Err(_) => {
                return Err(TransportError::ConnectTimeout {
                    addr: addr.to_string(),
                    timeout_ms: u64::try_from(connect_timeout.as_millis()).unwrap_or(u64::MAX),
                }
                .into())
            }
        };
        stream
            .set_nodelay(true)
            .map_err(|source| TransportError::Connect {
                addr: addr.to_string(),
                source,
            })?;

        info!(peer = addr, "Connected to RESP server");
        Ok(Self::with_peer(stream, addr))
    }
}

impl<S> RespClient<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    /// Wraps an already established stream.
    pub fn new(stream: S) -> Self {
        Self::with_peer(stream, "stream")
    }

    fn with_peer(stream: S, peer: &str) -> Self {
        Self {
            stream: BufStream::new(stream),
            peer: peer.to_string(),
            poisoned: None,
        }
    }

    /// The address or label of the remote end.
    pub fn peer(&self) -> &str {
        &self.peer
    }

    /// Returns true once an interrupted exchange has made the client unusable.
    pub fn is_poisoned(&self) -> bool {
        self.poisoned.is_some()
    }

    /// Sends `command` and waits for its reply.
    ///
    /// The context is checked before anything is written, and the write and
    /// read together are raced against its deadline and cancellation.
    /// A server error reply fails the call with [`ProtocolError::Server`] but
    /// leaves the client usable.
    pub async fn execute(&mut self, ctx: &Context, command: &Command) -> BloomResult<Reply> {
        if let Some(reason) = &self.poisoned {
            return Err(TransportError::Poisoned(reason.clone()).into());
        }
        ctx.check()?;

        debug!(
            peer = %self.peer,
            command = command.name(),
            args = command.arg_count(),
            "Sending RESP command"
        );

        let request = command.to_bytes();
        let stream = &mut self.stream;
        let result = ctx
            .run(async move {
                stream
                    .write_all(&request)
                    .await
                    .map_err(TransportError::Write)?;
                stream.flush().await.map_err(TransportError::Write)?;
                codec::read_reply(stream).await
            })
            .await;

        match &result {
            Ok(reply) => trace!(peer = %self.peer, reply = %reply, "Received RESP reply"),
            Err(BloomError::Protocol(ProtocolError::Server(message))) => {
                debug!(peer = %self.peer, error = %message, "RESP server returned an error")
            }
            Err(err) => {
                warn!(peer = %self.peer, error = %err, "RESP exchange failed, poisoning connection");
                self.poisoned = Some(err.to_string());
            }
        }
        result
    }

    /// Runs one `BITFIELD` request batching `ops` and returns one value per op.
    pub async fn bitfield(
        &mut self,
        ctx: &Context,
        key: &str,
        ops: &[BitFieldOp],
    ) -> BloomResult<Vec<i64>> {
        let reply = self.execute(ctx, &bitfield_command(key, ops)).await?;
        parse_bitfield_reply(reply, ops.len())
    }

    /// Consumes the client and returns the underlying stream.
    pub fn into_inner(self) -> S {
        self.stream.into_inner()
    }
}
