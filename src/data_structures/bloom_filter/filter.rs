// Copyright (c) 2025 Bloomkit Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! The bloom filter itself: sizing, a strategy and a bit store.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::bitstore::BitStore;
use super::sizing::optimal_num_of_bits_and_hash_functions;
use super::strategy::{DoubleHashStrategy, Strategy};
use crate::config::{FilterConfig, Validate};
use crate::context::Context;
use crate::error::BloomResult;

/// A bloom filter over a pluggable bit store.
///
/// The filter holds no mutable state of its own: its size and hash count are
/// fixed at construction, and every `add` or `may_exist` becomes exactly one
/// `set` or `get` on the store. Several filters may share one store (for
/// example through an `Arc`).
///
/// # Examples
///
/// ```
/// use bloomkit::context::Context;
/// use bloomkit::data_structures::bloom_filter::{BloomFilter, MemoryBitStore};
///
/// # tokio_test::block_on(async {
/// let filter = BloomFilter::new(1_000, 0.01, MemoryBitStore::new()).unwrap();
/// let ctx = Context::background();
///
/// filter.add(&ctx, "apple").await.unwrap();
/// assert!(filter.may_exist(&ctx, "apple").await.unwrap());
/// # });
/// ```
pub struct BloomFilter<S> {
    num_bits: u64,
    num_hash_functions: usize,
    strategy: Arc<dyn Strategy>,
    store: S,
}

impl<S: BitStore> BloomFilter<S> {
    /// Creates a filter sized for `expected_insertions` values at the target
    /// false positive probability.
    ///
    /// # Errors
    ///
    /// [`crate::error::BloomError::InvalidArgument`] when the sizing inputs are out
    /// of range.
    pub fn new(
        expected_insertions: i64,
        false_positive_probability: f64,
        store: S,
    ) -> BloomResult<Self> {
        let sizing =
            optimal_num_of_bits_and_hash_functions(expected_insertions, false_positive_probability)?;

        debug!(
            expected_insertions,
            false_positive_probability,
            num_bits = sizing.num_bits,
            num_hash_functions = sizing.num_hash_functions,
            "Created bloom filter"
        );

        Ok(Self {
            num_bits: sizing.num_bits.max(1),
            num_hash_functions: sizing.num_hash_functions,
            strategy: Arc::new(DoubleHashStrategy::new()),
            store,
        })
    }

    /// Creates a filter from validated configuration.
    pub fn from_config(config: &FilterConfig, store: S) -> BloomResult<Self> {
        config.validate()?;
        Self::new(
            config.expected_insertions,
            config.false_positive_probability,
            store,
        )
    }

    /// Replaces the hashing strategy.
    ///
    /// Values added under one strategy are not found under another.
    pub fn with_strategy(mut self, strategy: Arc<dyn Strategy>) -> Self {
        self.strategy = strategy;
        self
    }

    /// Records `value` as a member. Adding the same value twice is harmless.
    pub async fn add(&self, ctx: &Context, value: impl AsRef<[u8]>) -> BloomResult<()> {
        let positions = self.positions(value.as_ref());
        self.store.set(ctx, &positions).await
    }

    /// Returns false if `value` was definitely never added, true if it may have been.
    pub async fn may_exist(&self, ctx: &Context, value: impl AsRef<[u8]>) -> BloomResult<bool> {
        let positions = self.positions(value.as_ref());
        self.store.get(ctx, &positions).await
    }

    /// The bit positions `value` occupies.
    pub fn positions(&self, value: &[u8]) -> Vec<u64> {
        self.strategy
            .bloom_hash(value, self.num_hash_functions, self.num_bits)
    }

    /// Size of the bit universe. Never less than 1.
    pub fn num_bits(&self) -> u64 {
        self.num_bits
    }

    /// Number of hash functions per value.
    pub fn num_hash_functions(&self) -> usize {
        self.num_hash_functions
    }

    /// The underlying bit store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the filter and returns its bit store.
    pub fn into_store(self) -> S {
        self.store
    }
}

impl<S> fmt::Debug for BloomFilter<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BloomFilter")
            .field("num_bits", &self.num_bits)
            .field("num_hash_functions", &self.num_hash_functions)
            .field("strategy", &self.strategy)
            .finish_non_exhaustive()
    }
}
