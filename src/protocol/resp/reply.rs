// Copyright (c) 2025 Bloomkit Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Decoded RESP reply values and typed accessors.

use std::fmt::{Display, Formatter};

use crate::error::{BloomResult, ProtocolError};

/// A decoded RESP reply.
///
/// Error replies (`-...`) never become a `Reply`; they surface as
/// [`ProtocolError::Server`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Null bulk string (`$-1`) or null array (`*-1`).
    Nil,
    /// Simple string (`+OK`).
    Simple(String),
    /// Bulk string (`$<len>`).
    Bulk(Vec<u8>),
    /// Integer (`:<n>`).
    Integer(i64),
    /// Array of nested replies (`*<n>`).
    Array(Vec<Reply>),
}

impl Reply {
    /// Short description of the reply kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Reply::Nil => "nil",
            Reply::Simple(_) => "simple string",
            Reply::Bulk(_) => "bulk string",
            Reply::Integer(_) => "integer",
            Reply::Array(_) => "array",
        }
    }

    /// Returns true for a null reply.
    pub fn is_nil(&self) -> bool {
        matches!(self, Reply::Nil)
    }

    /// Interprets the reply as text.
    ///
    /// Simple and bulk strings are accepted; bulk strings must be valid UTF-8.
    pub fn into_string(self) -> BloomResult<String> {
        match self {
            Reply::Simple(s) => Ok(s),
            Reply::Bulk(bytes) => String::from_utf8(bytes).map_err(|e| {
                ProtocolError::UnexpectedReply {
                    expected: "UTF-8 string".to_string(),
                    got: format!("bulk string with invalid UTF-8: {e}"),
                }
                .into()
            }),
            other => Err(unexpected("string", &other)),
        }
    }

    /// Interprets the reply as raw bytes.
    pub fn into_bytes(self) -> BloomResult<Vec<u8>> {
        match self {
            Reply::Simple(s) => Ok(s.into_bytes()),
            Reply::Bulk(bytes) => Ok(bytes),
            other => Err(unexpected("bytes", &other)),
        }
    }

    /// Interprets the reply as a 64-bit integer.
    ///
    /// Integer replies are accepted as is; simple and bulk strings are parsed as
    /// decimal text, so `GET` of a counter works too.
    pub fn as_i64(&self) -> BloomResult<i64> {
        match self {
            Reply::Integer(n) => Ok(*n),
            Reply::Simple(s) => parse_i64(s.as_bytes()),
            Reply::Bulk(bytes) => parse_i64(bytes),
            other => Err(unexpected("integer", other)),
        }
    }

    /// Interprets the reply as an array of strings.
    pub fn into_strings(self) -> BloomResult<Vec<String>> {
        self.into_array("array of strings")?
            .into_iter()
            .map(Reply::into_string)
            .collect()
    }

    /// Interprets the reply as an array of 64-bit integers.
    pub fn into_i64s(self) -> BloomResult<Vec<i64>> {
        self.into_array("array of integers")?
            .iter()
            .map(Reply::as_i64)
            .collect()
    }

    /// Unwraps an array reply.
    pub fn into_array(self, expected: &str) -> BloomResult<Vec<Reply>> {
        match self {
            Reply::Array(items) => Ok(items),
            other => Err(unexpected(expected, &other)),
        }
    }
}

impl Display for Reply {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Reply::Nil => write!(f, "(nil)"),
            Reply::Simple(s) => write!(f, "{s}"),
            Reply::Bulk(bytes) => write!(f, "{:?}", String::from_utf8_lossy(bytes)),
            Reply::Integer(n) => write!(f, "(integer) {n}"),
            Reply::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}

fn parse_i64(bytes: &[u8]) -> BloomResult<i64> {
    std::str::from_utf8(bytes)
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or_else(|| {
            ProtocolError::InvalidInteger(String::from_utf8_lossy(bytes).into_owned()).into()
        })
}

fn unexpected(expected: &str, got: &Reply) -> crate::error::BloomError {
    ProtocolError::UnexpectedReply {
        expected: expected.to_string(),
        got: got.kind().to_string(),
    }
    .into()
}
