// Copyright (c) 2025 Bloomkit Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! In-memory bit store.

use async_trait::async_trait;
use parking_lot::RwLock;

use super::bitstore::BitStore;
use crate::context::Context;
use crate::error::{BloomError, BloomResult};

/// A growable byte buffer holding bits in memory.
///
/// Bit `pos` lives in byte `pos / 8` at bit `pos % 8`. The buffer starts empty
/// and grows, never shrinks, to cover the highest byte touched by `set`.
/// Reading beyond the buffer is not an error: those bits are simply unset.
///
/// Each `set` or `get` call holds the buffer lock for its whole batch of
/// positions, so concurrent calls never observe a half-applied batch.
#[derive(Debug, Default)]
pub struct MemoryBitStore {
    bytes: RwLock<Vec<u8>>,
}

impl MemoryBitStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store over existing bytes, e.g. a snapshot from [`to_bytes`](Self::to_bytes).
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            bytes: RwLock::new(bytes),
        }
    }

    /// Current size of the backing buffer in bytes.
    pub fn len_bytes(&self) -> usize {
        self.bytes.read().len()
    }

    /// Copies out the backing buffer.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bytes.read().clone()
    }

    /// Unsets every bit and releases the buffer.
    pub fn clear(&self) {
        let mut bytes = self.bytes.write();
        bytes.clear();
        bytes.shrink_to_fit();
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> u64 {
        self.bytes.read().iter().map(|b| u64::from(b.count_ones())).sum()
    }

    /// Sets every bit in `positions`, growing the buffer as needed.
    ///
    /// # Errors
    ///
    /// [`BloomError::IndexOverflow`] if a position's byte offset cannot be
    /// addressed or backed by memory. Nothing is modified in that case.
    pub fn set_bits(&self, positions: &[u64]) -> BloomResult<()> {
        let mut highest: Option<usize> = None;
        for &pos in positions {
            let index = byte_index(pos)?;
            highest = Some(highest.map_or(index, |h| h.max(index)));
        }
        let Some(highest) = highest else {
            return Ok(());
        };

        let mut bytes = self.bytes.write();
        if highest >= bytes.len() {
            let additional = highest + 1 - bytes.len();
            bytes.try_reserve_exact(additional).map_err(|_| {
                let position = positions
                    .iter()
                    .copied()
                    .max()
                    .unwrap_or_default();
                BloomError::IndexOverflow { position }
            })?;
            bytes.resize(highest + 1, 0);
        }
        for &pos in positions {
            // Indices were validated above and the buffer now covers them.
            bytes[(pos / 8) as usize] |= bit_mask(pos);
        }
        Ok(())
    }

    /// Returns true if every bit in `positions` is set.
    ///
    /// # Errors
    ///
    /// [`BloomError::IndexOverflow`] if a position's byte offset cannot be
    /// addressed on this platform.
    pub fn get_bits(&self, positions: &[u64]) -> BloomResult<bool> {
        let bytes = self.bytes.read();
        for &pos in positions {
            let index = byte_index(pos)?;
            match bytes.get(index) {
                Some(byte) if byte & bit_mask(pos) != 0 => {}
                _ => return Ok(false),
            }
        }
        Ok(true)
    }
}

#[async_trait]
impl BitStore for MemoryBitStore {
    async fn set(&self, ctx: &Context, positions: &[u64]) -> BloomResult<()> {
        ctx.check()?;
        self.set_bits(positions)
    }

    async fn get(&self, ctx: &Context, positions: &[u64]) -> BloomResult<bool> {
        ctx.check()?;
        self.get_bits(positions)
    }
}

fn byte_index(pos: u64) -> BloomResult<usize> {
    let index = pos / 8;
    if index > isize::MAX as u64 {
        return Err(BloomError::IndexOverflow { position: pos });
    }
    usize::try_from(index).map_err(|_| BloomError::IndexOverflow { position: pos })
}

fn bit_mask(pos: u64) -> u8 {
    1 << (pos % 8)
}
