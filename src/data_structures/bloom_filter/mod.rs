// Copyright (c) 2025 Bloomkit Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Bloom filter over pluggable bit stores.
//!
//! The filter is split into three parts that can be swapped independently:
//!
//! - a **sizing** function picking the number of bits `m` and hash functions `k` from
//!   the expected number of insertions and a target false positive rate,
//! - a **[`Strategy`]** mapping a value to its `k` positions in `[0, m)`,
//! - a **[`BitStore`]** holding the bits, either in process
//!   ([`MemoryBitStore`]) or in a Redis string addressed with `BITFIELD`
//!   ([`RedisBitStore`]).
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use bloomkit::context::Context;
//! use bloomkit::data_structures::bloom_filter::{BloomFilter, MemoryBitStore};
//!
//! # tokio_test::block_on(async {
//! let store = Arc::new(MemoryBitStore::new());
//! let filter = BloomFilter::new(1024, 0.001, Arc::clone(&store)).unwrap();
//! let ctx = Context::background();
//!
//! filter.add(&ctx, "seen").await.unwrap();
//! assert!(filter.may_exist(&ctx, "seen").await.unwrap());
//! assert!(store.len_bytes() > 0);
//! # });
//! ```

mod bitstore;
mod filter;
mod memory_store;
mod redis_store;
mod sizing;
mod strategy;

pub use bitstore::BitStore;
pub use filter::BloomFilter;
pub use memory_store::MemoryBitStore;
pub use redis_store::{BitFieldClient, RedisBitStore};
pub use sizing::{optimal_num_of_bits_and_hash_functions, BloomSizing};
pub use strategy::{DoubleHashStrategy, Strategy};
