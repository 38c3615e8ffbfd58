// Copyright (c) 2025 Bloomkit Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Fixed-size in-process bloom filter.

use super::hash::bloom_hash;

/// Largest supported bit count: positions are 32-bit.
const MAX_BITS: usize = (u32::MAX as usize / 8) * 8;

/// A bloom filter over an owned, fixed-size bit array.
///
/// Each value is hashed once; the `k` bit positions follow `h, h + delta, h + 2*delta...`
/// modulo the number of bits, where `delta` is `h` rotated right by 17 bits.
/// With ten bits per key the false positive rate stays under 2%.
///
/// Mutation takes `&mut self`; wrap the filter in a lock to share it.
///
/// # Examples
///
/// ```
/// use bloomkit::data_structures::bit_vector_bloom::BitVectorBloom;
///
/// let mut bloom = BitVectorBloom::new(10, 1_000);
/// bloom.add("hello");
/// assert!(bloom.may_exist("hello"));
/// assert!(!bloom.test_and_add("world"));
/// assert!(bloom.test_and_add("world"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitVectorBloom {
    k: usize,
    bits: u32,
    filter: Vec<u8>,
}

impl BitVectorBloom {
    /// Creates a filter for about `expected_len` keys at `bits_per_key` bits each.
    ///
    /// The hash count is `bits_per_key * 0.69` (roughly ln 2), kept within
    /// `[1, 30]`. At least 64 bits are allocated so tiny filters stay useful,
    /// and the total is rounded up to whole bytes.
    pub fn new(bits_per_key: usize, expected_len: usize) -> Self {
        let k = ((bits_per_key as f64) * 0.69) as usize;
        let k = k.clamp(1, 30);

        let bits = expected_len.saturating_mul(bits_per_key).max(64);
        let bytes = bits.div_ceil(8).min(MAX_BITS / 8);
        let bits = u32::try_from(bytes * 8).unwrap_or(MAX_BITS as u32);

        Self {
            k,
            bits,
            filter: vec![0; bytes],
        }
    }

    /// Records `value` as present.
    pub fn add(&mut self, value: impl AsRef<[u8]>) {
        for pos in self.bit_positions(value.as_ref()) {
            let (byte, mask) = locate(pos);
            self.filter[byte] |= mask;
        }
    }

    /// Returns false if `value` was definitely never added.
    pub fn may_exist(&self, value: impl AsRef<[u8]>) -> bool {
        self.bit_positions(value.as_ref()).all(|pos| {
            let (byte, mask) = locate(pos);
            self.filter[byte] & mask != 0
        })
    }

    /// Adds `value` and reports whether it was already present.
    ///
    /// Returns true only if every addressed bit was set before the call.
    pub fn test_and_add(&mut self, value: impl AsRef<[u8]>) -> bool {
        let mut exists = true;
        for pos in self.bit_positions(value.as_ref()) {
            let (byte, mask) = locate(pos);
            if self.filter[byte] & mask == 0 {
                self.filter[byte] |= mask;
                exists = false;
            }
        }
        exists
    }

    /// Clears every bit.
    pub fn reset(&mut self) {
        self.filter.fill(0);
    }

    /// Number of bits in the filter.
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Number of hash functions per value.
    pub fn hash_count(&self) -> usize {
        self.k
    }

    /// Size of the bit array in bytes.
    pub fn len_bytes(&self) -> usize {
        self.filter.len()
    }

    fn bit_positions(&self, value: &[u8]) -> impl Iterator<Item = u32> {
        let bits = self.bits;
        let mut h = bloom_hash(value);
        let delta = h.rotate_right(17);
        (0..self.k).map(move |_| {
            let pos = h % bits;
            h = h.wrapping_add(delta);
            pos
        })
    }
}

fn locate(pos: u32) -> (usize, u8) {
    ((pos / 8) as usize, 1 << (pos % 8))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(10, 1_000 => (6, 10_000); "ten bits per key")]
    #[test_case(10, 2 => (6, 64); "minimum size")]
    #[test_case(1, 100 => (1, 104); "at least one hash function")]
    #[test_case(100, 10 => (30, 1_000); "at most thirty hash functions")]
    #[test_case(3, 33 => (2, 104); "rounded to bytes")]
    fn test_sizing(bits_per_key: usize, expected_len: usize) -> (usize, u32) {
        let bloom = BitVectorBloom::new(bits_per_key, expected_len);
        assert_eq!(bloom.len_bytes() * 8, bloom.bits() as usize);
        (bloom.hash_count(), bloom.bits())
    }

    #[test]
    fn test_empty() {
        let bloom = BitVectorBloom::new(10, 1_000_000);
        assert!(!bloom.may_exist("hello"));
        assert!(!bloom.may_exist("world"));
    }

    #[test]
    fn test_small() {
        let mut bloom = BitVectorBloom::new(10, 2);
        bloom.add("hello");
        bloom.add("world");
        assert!(bloom.may_exist("hello"));
        assert!(bloom.may_exist("world"));
        assert!(!bloom.may_exist("x"));
        assert!(!bloom.may_exist("w"));
    }

    #[test]
    fn test_test_and_add() {
        let mut bloom = BitVectorBloom::new(10, 2);
        assert!(!bloom.test_and_add("hello"));
        assert!(!bloom.test_and_add("world"));
        assert!(bloom.test_and_add("hello"));
        assert!(bloom.test_and_add("world"));
        assert!(!bloom.may_exist("x"));
        assert!(!bloom.may_exist("w"));
    }

    #[test]
    fn test_reset() {
        let mut bloom = BitVectorBloom::new(10, 100);
        bloom.add("hello");
        bloom.reset();
        assert!(!bloom.may_exist("hello"));
        assert_eq!(bloom.len_bytes(), 125);
    }

    #[test]
    fn test_huge_request_is_capped() {
        let bloom = BitVectorBloom::new(usize::MAX, 0);
        assert_eq!(bloom.hash_count(), 30);
        assert_eq!(bloom.bits(), 64);
    }
}
