// Copyright (c) 2025 Bloomkit Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Bit store kept in a remote Redis string, driven through `BITFIELD`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::Mutex;

use super::bitstore::BitStore;
use crate::context::Context;
use crate::error::{BloomError, BloomResult};
use crate::protocol::resp::{BitFieldOp, RespClient};

/// A client able to run one `BITFIELD` request.
///
/// Returns one integer per op: the bit for `GET`, the previous bit for `SET`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BitFieldClient: Send + Sync {
    /// Runs `BITFIELD key ops...` as a single request.
    async fn bitfield(&self, ctx: &Context, key: &str, ops: &[BitFieldOp])
        -> BloomResult<Vec<i64>>;
}

/// A RESP client shared behind an async mutex.
///
/// Waiting for the lock is bounded by the caller's context.
#[async_trait]
impl<S> BitFieldClient for Mutex<RespClient<S>>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    async fn bitfield(
        &self,
        ctx: &Context,
        key: &str,
        ops: &[BitFieldOp],
    ) -> BloomResult<Vec<i64>> {
        let mut client = ctx.run(async { Ok::<_, BloomError>(self.lock().await) }).await?;
        client.bitfield(ctx, key, ops).await
    }
}

/// Bits stored under one key of a remote server.
///
/// Each `set` or `get` becomes exactly one `BITFIELD` request batching a
/// one-bit sub-command per position. The connection handle is shared, so many
/// stores (and filters) can use one client.
#[derive(Debug)]
pub struct RedisBitStore<C: ?Sized> {
    client: Arc<C>,
    key: String,
    default_timeout: Option<Duration>,
}

impl<C: BitFieldClient + ?Sized> RedisBitStore<C> {
    /// Creates a store over `key` using a shared client.
    pub fn new(client: Arc<C>, key: impl Into<String>) -> Self {
        Self {
            client,
            key: key.into(),
            default_timeout: None,
        }
    }

    /// Applies `timeout` to calls whose context has no deadline of its own.
    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = Some(timeout);
        self
    }

    /// The remote key holding the bits.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The shared client.
    pub fn client(&self) -> &Arc<C> {
        &self.client
    }

    fn scoped(&self, ctx: &Context) -> Context {
        match self.default_timeout {
            Some(timeout) => ctx.or_timeout(timeout),
            None => ctx.clone(),
        }
    }
}

#[async_trait]
impl<C: BitFieldClient + ?Sized> BitStore for RedisBitStore<C> {
    async fn set(&self, ctx: &Context, positions: &[u64]) -> BloomResult<()> {
        if positions.is_empty() {
            return Ok(());
        }
        let ops: Vec<BitFieldOp> = positions
            .iter()
            .map(|&pos| BitFieldOp::Set(pos, true))
            .collect();
        let ctx = self.scoped(ctx);
        self.client.bitfield(&ctx, &self.key, &ops).await?;
        Ok(())
    }

    async fn get(&self, ctx: &Context, positions: &[u64]) -> BloomResult<bool> {
        if positions.is_empty() {
            return Ok(true);
        }
        let ops: Vec<BitFieldOp> = positions.iter().map(|&pos| BitFieldOp::Get(pos)).collect();
        let ctx = self.scoped(ctx);
        let values = self.client.bitfield(&ctx, &self.key, &ops).await?;
        Ok(values.iter().all(|&v| v == 1))
    }
}
