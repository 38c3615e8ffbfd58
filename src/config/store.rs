//! Bit store configuration.
//!
//! Selects where filter bits live and, for the Redis backend, how to reach the
//! server.

use std::sync::Arc;
use std::time::Duration;

use super::ConfigResult;
use super::Validate;
use crate::data_structures::bloom_filter::RedisBitStore;
use crate::error::config::ConfigError;
use crate::error::BloomResult;
use crate::protocol::resp::RespClient;
use serde::{Deserialize, Serialize};
use tokio::net::TcpStream;
use tokio::sync::Mutex;

/// Where filter bits are kept.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// In-process byte buffer
    #[default]
    Memory,
    /// A string value on a Redis server
    Redis,
}

/// Bit store configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    /// Backend to use
    pub backend: StoreBackend,

    /// Redis connection settings, used when `backend` is `redis`
    pub redis: RedisStoreConfig,
}

impl Validate for StoreConfig {
    fn validate(&self) -> ConfigResult<()> {
        match self.backend {
            StoreBackend::Memory => Ok(()),
            StoreBackend::Redis => self.redis.validate(),
        }
    }
}

/// Connection settings for a Redis-backed bit store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RedisStoreConfig {
    /// Server address as `host:port`
    pub address: String,

    /// Key holding the filter bits
    pub key: String,

    /// Connect timeout in milliseconds
    pub connect_timeout_ms: u64,

    /// Per-call timeout in milliseconds when the caller sets no deadline
    pub io_timeout_ms: u64,
}

impl Default for RedisStoreConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:6379".to_string(),
            key: "bloomkit".to_string(),
            connect_timeout_ms: 5_000,
            io_timeout_ms: 3_000,
        }
    }
}

impl RedisStoreConfig {
    /// Dials the server and returns a store over the new connection.
    ///
    /// The connection is wrapped in a mutex so the store (and clones of its
    /// client handle) issue one request at a time.
    pub async fn connect(&self) -> BloomResult<RedisBitStore<Mutex<RespClient<TcpStream>>>> {
        self.validate()?;
        let client = RespClient::connect(
            &self.address,
            Duration::from_millis(self.connect_timeout_ms),
        )
        .await?;
        Ok(RedisBitStore::new(Arc::new(Mutex::new(client)), self.key.clone())
            .with_default_timeout(Duration::from_millis(self.io_timeout_ms)))
    }
}

impl Validate for RedisStoreConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.address.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "redis address cannot be empty".to_string(),
            ));
        }

        if self.key.is_empty() {
            return Err(ConfigError::ValidationError(
                "redis key cannot be empty".to_string(),
            ));
        }

        if self.connect_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "connect_timeout_ms must be greater than 0".to_string(),
            ));
        }

        if self.io_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "io_timeout_ms must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
