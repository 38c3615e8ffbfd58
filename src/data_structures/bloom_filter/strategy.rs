// Copyright (c) 2025 Bloomkit Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Hashing strategies for the bloom filter.
//!
//! A strategy maps a value to the `k` bit positions it occupies. It must be
//! deterministic: `add` and `may_exist` only agree if the same value always
//! lands on the same positions.

use std::fmt::Debug;
use std::hash::Hasher;

use fnv::FnvHasher;

/// Maps a value to `k` bit positions in a universe of `m` bits.
pub trait Strategy: Send + Sync + Debug {
    /// Returns `k` positions, each in `[0, m)`.
    ///
    /// A universe of 0 bits is treated as a single bit.
    fn bloom_hash(&self, value: &[u8], k: usize, m: u64) -> Vec<u64>;
}

/// Double hashing over FNV-1a 64.
///
/// One real hash `h` and a derived step `delta` (h rotated right by 17 bits)
/// generate all bit positions, following Kirsch and Mitzenmacher, "Less Hashing,
/// Same Performance: Building a Better Bloom Filter" (2006). Position `i` is
/// `(h + i*i) mod m`, after which `h` advances by `delta`. All arithmetic
/// wraps at 64 bits.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DoubleHashStrategy;

impl DoubleHashStrategy {
    /// Create a new instance of the strategy.
    pub fn new() -> Self {
        Self
    }
}

impl Strategy for DoubleHashStrategy {
    fn bloom_hash(&self, value: &[u8], k: usize, m: u64) -> Vec<u64> {
        let m = m.max(1);
        let mut hasher = FnvHasher::default();
        hasher.write(value);
        let mut h = hasher.finish();
        let delta = h.rotate_right(17);

        let mut positions = Vec::with_capacity(k);
        for i in 0..k as u64 {
            positions.push(h.wrapping_add(i.wrapping_mul(i)) % m);
            h = h.wrapping_add(delta);
        }
        positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_first_position_is_fnv1a() {
        // FNV-1a 64 of "a" is 0xaf63dc4c8601ec8c.
        let h: u64 = 0xaf63_dc4c_8601_ec8c;
        let positions = DoubleHashStrategy.bloom_hash(b"a", 3, u64::MAX);

        let delta = h.rotate_right(17);
        let h1 = h.wrapping_add(delta);
        let h2 = h1.wrapping_add(delta);
        assert_eq!(
            positions,
            vec![h % u64::MAX, h1.wrapping_add(1) % u64::MAX, h2.wrapping_add(4) % u64::MAX]
        );
    }

    #[test]
    fn test_positions_within_universe() {
        let strategy = DoubleHashStrategy::new();
        for m in [1u64, 7, 64, 1000, 14_723] {
            let positions = strategy.bloom_hash(b"test_string", 10, m);
            assert_eq!(positions.len(), 10);
            assert!(positions.iter().all(|&p| p < m));
        }
    }

    #[test]
    fn test_zero_bit_universe_maps_to_zero() {
        let positions = DoubleHashStrategy.bloom_hash(b"x", 4, 0);
        assert_eq!(positions, vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_hash_stability() {
        let strategy = DoubleHashStrategy::new();
        let first_run = strategy.bloom_hash(b"stable_hash_test", 5, 1023);
        let second_run = strategy.bloom_hash(b"stable_hash_test", 5, 1023);
        assert_eq!(first_run, second_run);
    }

    #[test]
    fn test_different_inputs_produce_different_positions() {
        let strategy = DoubleHashStrategy::new();
        let a = strategy.bloom_hash(b"input1", 5, 1 << 20);
        let b = strategy.bloom_hash(b"input2", 5, 1 << 20);
        assert_ne!(a, b);
        assert!(a.iter().collect::<HashSet<_>>().len() >= 4);
    }

    #[test]
    fn test_zero_hash_functions() {
        assert!(DoubleHashStrategy.bloom_hash(b"x", 0, 100).is_empty());
    }
}
