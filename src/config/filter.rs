//! Bloom filter sizing configuration.

use super::ConfigResult;
use super::Validate;
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Sizing inputs for a [`crate::data_structures::BloomFilter`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Number of values the filter is expected to hold
    pub expected_insertions: i64,

    /// Target false positive probability, within [0, 1]
    pub false_positive_probability: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            expected_insertions: 100_000,
            false_positive_probability: 0.01,
        }
    }
}

impl Validate for FilterConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.expected_insertions < 0 {
            return Err(ConfigError::ValidationError(format!(
                "expected_insertions must be non-negative, got {}",
                self.expected_insertions
            )));
        }

        if !(0.0..=1.0).contains(&self.false_positive_probability) {
            return Err(ConfigError::ValidationError(format!(
                "false_positive_probability must be within [0, 1], got {}",
                self.false_positive_probability
            )));
        }

        Ok(())
    }
}
