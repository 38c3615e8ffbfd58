// Copyright (c) 2025 Bloomkit Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! RESP request encoding.
//!
//! A request is an array of bulk strings: `*<argc>\r\n` followed by
//! `$<len>\r\n<bytes>\r\n` for the command name and for each argument.

use super::CRLF;

/// Conversion of a command argument into the bytes sent on the wire.
///
/// Strings and byte slices are sent verbatim, integers as decimal text.
pub trait ToArg {
    /// Returns the raw bytes of this argument.
    fn to_arg(&self) -> Vec<u8>;
}

impl ToArg for str {
    fn to_arg(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}

impl ToArg for String {
    fn to_arg(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}

impl ToArg for [u8] {
    fn to_arg(&self) -> Vec<u8> {
        self.to_vec()
    }
}

impl ToArg for Vec<u8> {
    fn to_arg(&self) -> Vec<u8> {
        self.clone()
    }
}

impl<T: ToArg + ?Sized> ToArg for &T {
    fn to_arg(&self) -> Vec<u8> {
        (**self).to_arg()
    }
}

macro_rules! impl_to_arg_for_integers {
    ($($ty:ty),*) => {
        $(
            impl ToArg for $ty {
                fn to_arg(&self) -> Vec<u8> {
                    self.to_string().into_bytes()
                }
            }
        )*
    };
}

impl_to_arg_for_integers!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// A command ready to be sent to a RESP server.
///
/// # Examples
///
/// ```
/// use bloomkit::protocol::resp::Command;
///
/// let cmd = Command::new("BITFIELD").arg("bloom").arg("set").arg("u1").arg(5u64).arg(1);
/// assert_eq!(
///     cmd.to_bytes(),
///     b"*6\r\n$8\r\nBITFIELD\r\n$5\r\nbloom\r\n$3\r\nset\r\n$2\r\nu1\r\n$1\r\n5\r\n$1\r\n1\r\n".to_vec()
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    name: String,
    args: Vec<Vec<u8>>,
}

impl Command {
    /// Starts a command with the given name, e.g. `"BITFIELD"`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Appends one argument.
    pub fn arg<A: ToArg>(mut self, arg: A) -> Self {
        self.args.push(arg.to_arg());
        self
    }

    /// Appends every argument from an iterator.
    pub fn args<I>(mut self, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToArg,
    {
        self.args.extend(args.into_iter().map(|a| a.to_arg()));
        self
    }

    /// The command name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of arguments, not counting the command name.
    pub fn arg_count(&self) -> usize {
        self.args.len()
    }

    /// Appends the wire encoding of this command to `out`.
    pub fn encode(&self, out: &mut Vec<u8>) {
        out.push(b'*');
        out.extend_from_slice((self.args.len() + 1).to_string().as_bytes());
        out.extend_from_slice(CRLF);
        write_bulk(out, self.name.as_bytes());
        for arg in &self.args {
            write_bulk(out, arg);
        }
    }

    /// Returns the wire encoding of this command.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len_hint());
        self.encode(&mut out);
        out
    }

    fn encoded_len_hint(&self) -> usize {
        // 16 bytes covers the header and per-item framing in practice.
        16 + self.name.len() + self.args.iter().map(|a| a.len() + 16).sum::<usize>()
    }
}

fn write_bulk(out: &mut Vec<u8>, data: &[u8]) {
    out.push(b'$');
    out.extend_from_slice(data.len().to_string().as_bytes());
    out.extend_from_slice(CRLF);
    out.extend_from_slice(data);
    out.extend_from_slice(CRLF);
}
