//! Bloomkit: bloom filters over pluggable bit stores.
//!
//! The crate provides two probabilistic set membership filters and the
//! plumbing behind them:
//!
//! - [`data_structures::bloom_filter`]: a filter sized from an expected count
//!   and a false positive target, hashing through a pluggable strategy into a
//!   pluggable bit store (in memory, or a Redis string driven by `BITFIELD`).
//! - [`data_structures::bit_vector_bloom`]: a fixed in-process bit array.
//! - [`protocol::resp`]: the minimal RESP client backing the Redis store.
//! - [`context`]: per-call deadlines and cancellation.
//! - [`config`]: layered configuration (defaults, file, environment).
//!
//! # Example
//!
//! ```
//! use bloomkit::context::Context;
//! use bloomkit::data_structures::{BloomFilter, MemoryBitStore};
//!
//! # tokio_test::block_on(async {
//! let filter = BloomFilter::new(10_000, 0.01, MemoryBitStore::new())?;
//! let ctx = Context::background();
//!
//! filter.add(&ctx, "user:42").await?;
//! assert!(filter.may_exist(&ctx, "user:42").await?);
//! # Ok::<(), bloomkit::error::BloomError>(())
//! # }).unwrap();
//! ```

pub mod config;
pub mod context;
pub mod data_structures;
pub mod error;
pub mod protocol;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

use tracing_subscriber::EnvFilter;

use crate::config::{LogConfig, Validate};
use crate::error::config::ConfigError;

/// Version information for bloomkit.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Installs a global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Fails if the
/// configuration is invalid or a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> Result<(), ConfigError> {
    config.validate()?;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|e| ConfigError::LoggingError(e.to_string()))?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_line_number(config.source_location)
        .with_file(config.source_location)
        .with_thread_names(true);

    let result = if config.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.pretty().finish())
    };

    result.map_err(|e| {
        ConfigError::LoggingError(format!("Failed to set global tracing subscriber: {e}"))
    })
}
