// Copyright (c) 2025 Bloomkit Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! RESP reply decoding.
//!
//! Replies are dispatched on their leading type byte:
//!
//! | byte | reply         | body                                     |
//! |------|---------------|------------------------------------------|
//! | `+`  | simple string | rest of the line                         |
//! | `-`  | error         | rest of the line, becomes an `Err`       |
//! | `:`  | integer       | decimal on the same line                 |
//! | `$`  | bulk string   | length line, payload, CRLF (`-1` is nil) |
//! | `*`  | array         | count line, then that many replies       |

use futures::future::{BoxFuture, FutureExt};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

use super::reply::Reply;
use super::{CRLF, MAX_BULK_LEN};
use crate::error::{BloomError, BloomResult, ProtocolError, TransportError};

const SIMPLE_STRING: u8 = b'+';
const ERROR: u8 = b'-';
const INTEGER: u8 = b':';
const BULK_STRING: u8 = b'$';
const ARRAY: u8 = b'*';

/// Upper bound on the capacity reserved up front for an array reply.
const MAX_ARRAY_PREALLOC: usize = 1024;

/// Upper bound on the capacity reserved up front for a bulk payload.
const MAX_BULK_PREALLOC: usize = 64 * 1024;

/// Deepest array nesting accepted. `BITFIELD` replies are one level deep.
pub const MAX_NESTING: usize = 64;

/// Longest header or simple line accepted, excluding CRLF. Large payloads
/// arrive as bulk strings.
pub const MAX_LINE_LEN: usize = 64 * 1024;

/// Reads one complete reply from `reader`.
///
/// End of stream before the first byte is reported as
/// [`TransportError::ConnectionClosed`]; end of stream anywhere after that is a
/// [`ProtocolError::Truncated`]. Arrays nested more than [`MAX_NESTING`]
/// levels fail with [`ProtocolError::TooDeep`], and lines longer than
/// [`MAX_LINE_LEN`] with [`ProtocolError::InvalidLength`].
pub async fn read_reply<R>(reader: &mut R) -> BloomResult<Reply>
where
    R: AsyncBufRead + Unpin + Send,
{
    read_value(reader, 0).await
}

fn read_value<'a, R>(reader: &'a mut R, depth: usize) -> BoxFuture<'a, BloomResult<Reply>>
where
    R: AsyncBufRead + Unpin + Send + 'a,
{
    async move {
        let marker = match reader.read_u8().await {
            Ok(byte) => byte,
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                return Err(if depth == 0 {
                    TransportError::ConnectionClosed.into()
                } else {
                    truncated("missing nested reply")
                });
            }
            Err(e) => return Err(TransportError::Read(e).into()),
        };

        let reply: BloomResult<Reply> = match marker {
            SIMPLE_STRING => {
                let line = read_line(reader).await?;
                Ok(Reply::Simple(String::from_utf8_lossy(&line).into_owned()))
            }
            ERROR => {
                let line = read_line(reader).await?;
                Err(ProtocolError::Server(String::from_utf8_lossy(&line).into_owned()).into())
            }
            INTEGER => {
                let line = read_line(reader).await?;
                parse_integer(&line)
                    .map(Reply::Integer)
                    .ok_or_else(|| ProtocolError::InvalidInteger(lossy(&line)).into())
            }
            BULK_STRING => {
                let len = read_length(reader).await?;
                match len {
                    None => Ok(Reply::Nil),
                    Some(len) if len > MAX_BULK_LEN => {
                        Err(ProtocolError::InvalidLength(format!(
                            "bulk length {len} exceeds {MAX_BULK_LEN}"
                        ))
                        .into())
                    }
                    Some(len) => {
                        let mut data = Vec::with_capacity(len.min(MAX_BULK_PREALLOC));
                        let read = (&mut *reader)
                            .take(len as u64)
                            .read_to_end(&mut data)
                            .await
                            .map_err(TransportError::Read)?;
                        if read < len {
                            return Err(truncated(&format!(
                                "bulk payload of {len} bytes, got {read}"
                            )));
                        }
                        let mut separator = [0u8; 2];
                        read_exact(reader, &mut separator, "bulk terminator").await?;
                        if separator != *CRLF {
                            return Err(ProtocolError::MissingCrlf(lossy(&separator)).into());
                        }
                        Ok(Reply::Bulk(data))
                    }
                }
            }
            ARRAY => {
                let count = read_length(reader).await?;
                match count {
                    None => Ok(Reply::Nil),
                    Some(_) if depth >= MAX_NESTING => Err(ProtocolError::TooDeep {
                        limit: MAX_NESTING,
                    }
                    .into()),
                    Some(count) => {
                        // Error elements are drained so the stream stays aligned
                        // on reply boundaries; the first one is reported.
                        let mut items = Vec::with_capacity(count.min(MAX_ARRAY_PREALLOC));
                        let mut server_error = None;
                        for _ in 0..count {
                            match read_value(reader, depth + 1).await {
                                Ok(item) => items.push(item),
                                Err(BloomError::Protocol(ProtocolError::Server(message))) => {
                                    server_error.get_or_insert(message);
                                }
                                Err(e) => return Err(e),
                            }
                        }
                        match server_error {
                            Some(message) => Err(ProtocolError::Server(message).into()),
                            None => Ok(Reply::Array(items)),
                        }
                    }
                }
            }
            byte => Err(ProtocolError::UnknownType { byte }.into()),
        };
        reply
    }
    .boxed()
}

/// Reads a CRLF-terminated line and returns it without the terminator.
async fn read_line<R>(reader: &mut R) -> BloomResult<Vec<u8>>
where
    R: AsyncBufRead + Unpin + Send,
{
    let mut line = Vec::new();
    let limit = MAX_LINE_LEN as u64 + CRLF.len() as u64;
    let n = (&mut *reader)
        .take(limit)
        .read_until(b'\n', &mut line)
        .await
        .map_err(TransportError::Read)?;
    if line.last() != Some(&b'\n') && n as u64 == limit {
        return Err(ProtocolError::InvalidLength(format!(
            "line exceeds {MAX_LINE_LEN} bytes"
        ))
        .into());
    }
    if n == 0 || line.last() != Some(&b'\n') {
        return Err(truncated(&format!("incomplete line {:?}", lossy(&line))));
    }
    line.pop();
    if line.last() != Some(&b'\r') {
        return Err(ProtocolError::MissingCrlf(lossy(&line)).into());
    }
    line.pop();
    Ok(line)
}

/// Reads a length line. `-1` is the null marker and yields `None`.
async fn read_length<R>(reader: &mut R) -> BloomResult<Option<usize>>
where
    R: AsyncBufRead + Unpin + Send,
{
    let line = read_line(reader).await?;
    match parse_integer(&line) {
        Some(-1) => Ok(None),
        Some(n) if n >= 0 => usize::try_from(n)
            .map(Some)
            .map_err(|_| ProtocolError::InvalidLength(lossy(&line)).into()),
        _ => Err(ProtocolError::InvalidLength(lossy(&line)).into()),
    }
}

async fn read_exact<R>(reader: &mut R, buf: &mut [u8], what: &str) -> BloomResult<()>
where
    R: AsyncBufRead + Unpin + Send,
{
    match reader.read_exact(buf).await {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
            Err(truncated(&format!("{what} of {} bytes", buf.len())))
        }
        Err(e) => Err(TransportError::Read(e).into()),
    }
}

fn parse_integer(line: &[u8]) -> Option<i64> {
    std::str::from_utf8(line).ok()?.parse::<i64>().ok()
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn truncated(what: &str) -> BloomError {
    ProtocolError::Truncated(what.to_string()).into()
}
