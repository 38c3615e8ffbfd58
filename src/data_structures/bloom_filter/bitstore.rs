// Copyright (c) 2025 Bloomkit Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Bit storage behind a bloom filter.

use std::sync::Arc;

use async_trait::async_trait;

use crate::context::Context;
use crate::error::BloomResult;

/// A vector of bits addressed by position.
///
/// Implementations decide where the bits live; the bloom filter only ever
/// sets bits and asks whether a group of bits is all set.
#[async_trait]
pub trait BitStore: Send + Sync {
    /// Sets every bit in `positions`.
    async fn set(&self, ctx: &Context, positions: &[u64]) -> BloomResult<()>;

    /// Returns true if every bit in `positions` is set.
    async fn get(&self, ctx: &Context, positions: &[u64]) -> BloomResult<bool>;
}

#[async_trait]
impl<T: BitStore + ?Sized> BitStore for Arc<T> {
    async fn set(&self, ctx: &Context, positions: &[u64]) -> BloomResult<()> {
        (**self).set(ctx, positions).await
    }

    async fn get(&self, ctx: &Context, positions: &[u64]) -> BloomResult<bool> {
        (**self).get(ctx, positions).await
    }
}
