// Copyright (c) 2025 Bloomkit Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! 32-bit murmur-like hash used by the bit-vector bloom.

/// Seed for bloom hashing.
pub(crate) const BLOOM_SEED: u32 = 0xbc9f1d34;

const M: u32 = 0xc6a4a793;
const R: u32 = 24;

/// Hashes `data` the way leveldb's `Hash` does.
///
/// Full little-endian words are consumed while at least four bytes remain,
/// then a tail of one to three bytes is mixed in.
///
/// Inputs whose length is a multiple of four hash differently from a loop that
/// stops while four bytes remain, so bit arrays built with such a loop are not
/// readable by this filter.
pub(crate) fn hash(data: &[u8], seed: u32) -> u32 {
    // Lengths past u32::MAX wrap, as in the 32-bit reference.
    let n = data.len() as u32;
    let mut h = seed ^ n.wrapping_mul(M);

    let mut words = data.chunks_exact(4);
    for word in &mut words {
        let w = u32::from_le_bytes([word[0], word[1], word[2], word[3]]);
        h = h.wrapping_add(w);
        h = h.wrapping_mul(M);
        h ^= h >> 16;
    }

    let tail = words.remainder();
    if !tail.is_empty() {
        let w = tail
            .iter()
            .enumerate()
            .fold(0u32, |acc, (i, &b)| acc | (u32::from(b) << (8 * i)));
        h = h.wrapping_add(w);
        h = h.wrapping_mul(M);
        h ^= h >> R;
    }
    h
}

/// Hash used for bloom bit positions.
pub(crate) fn bloom_hash(data: &[u8]) -> u32 {
    hash(data, BLOOM_SEED)
}
