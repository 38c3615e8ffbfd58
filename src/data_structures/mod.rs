//! Probabilistic set membership structures.
//!
//! Two bloom filter flavours live here:
//! - [`bloom_filter`]: sized from an expected count and a target false positive
//!   rate, with a pluggable hashing strategy and bit store (memory or Redis).
//! - [`bit_vector_bloom`]: a fixed in-process bit array sized in bits per key.

pub mod bit_vector_bloom;
pub mod bloom_filter;

pub use bit_vector_bloom::BitVectorBloom;
pub use bloom_filter::{BitStore, BloomFilter, MemoryBitStore, RedisBitStore};
