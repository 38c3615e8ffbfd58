// Copyright (c) 2025 Bloomkit Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! `BITFIELD` sub-commands over single-bit unsigned fields.

use super::command::Command;
use super::reply::Reply;
use crate::error::{BloomResult, ProtocolError};

/// Field type used for every sub-command: one unsigned bit.
const FIELD_TYPE: &str = "u1";

/// One `BITFIELD` sub-command addressing a single bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitFieldOp {
    /// `GET u1 <offset>`
    Get(u64),
    /// `SET u1 <offset> <value>`
    Set(u64, bool),
}

impl BitFieldOp {
    fn append_to(self, command: Command) -> Command {
        match self {
            BitFieldOp::Get(offset) => command.arg("get").arg(FIELD_TYPE).arg(offset),
            BitFieldOp::Set(offset, value) => command
                .arg("set")
                .arg(FIELD_TYPE)
                .arg(offset)
                .arg(u8::from(value)),
        }
    }
}

/// Builds one `BITFIELD <key> ...` request batching every op.
pub fn bitfield_command(key: &str, ops: &[BitFieldOp]) -> Command {
    ops.iter()
        .fold(Command::new("BITFIELD").arg(key), |command, op| {
            op.append_to(command)
        })
}

/// Extracts one integer per op from a `BITFIELD` reply.
///
/// For `GET` the value is the bit; for `SET` it is the bit's previous value.
pub fn parse_bitfield_reply(reply: Reply, expected: usize) -> BloomResult<Vec<i64>> {
    let values = reply.into_i64s()?;
    if values.len() != expected {
        return Err(ProtocolError::UnexpectedReply {
            expected: format!("{expected} BITFIELD results"),
            got: format!("{} results", values.len()),
        }
        .into());
    }
    Ok(values)
}
