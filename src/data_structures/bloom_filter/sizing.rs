// Copyright (c) 2025 Bloomkit Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Optimal bloom filter parameters.

use std::f64::consts::LN_2;

use crate::error::{BloomError, BloomResult};

/// Number of bits and number of hash functions for a bloom filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BloomSizing {
    /// Size of the bit universe, `m`.
    pub num_bits: u64,
    /// Number of hash functions per value, `k`.
    pub num_hash_functions: usize,
}

/// Computes the optimal number of bits and hash functions.
///
/// This uses the formulas:
/// - m = ceil(-n*ln(p)/(ln(2)^2))
/// - k = round(m/n*ln(2)), at least 1
///
/// where n is the number of expected insertions and p the target false
/// positive probability. A probability of exactly 0 is replaced by the smallest
/// positive `f64` so the logarithm stays finite.
///
/// See <https://en.wikipedia.org/wiki/Bloom_filter#Probability_of_false_positives>.
///
/// # Errors
///
/// [`BloomError::InvalidArgument`] if `expected_insertions` is negative or the
/// probability is outside `[0, 1]` (NaN included).
///
/// # Examples
///
/// ```
/// use bloomkit::data_structures::bloom_filter::optimal_num_of_bits_and_hash_functions;
///
/// let sizing = optimal_num_of_bits_and_hash_functions(1024, 0.001).unwrap();
/// assert_eq!(sizing.num_bits, 14_723);
/// assert_eq!(sizing.num_hash_functions, 10);
/// ```
pub fn optimal_num_of_bits_and_hash_functions(
    expected_insertions: i64,
    false_positive_probability: f64,
) -> BloomResult<BloomSizing> {
    if expected_insertions < 0 {
        return Err(BloomError::InvalidArgument(format!(
            "expected insertions must be non-negative, got {expected_insertions}"
        )));
    }
    if !(0.0..=1.0).contains(&false_positive_probability) {
        return Err(BloomError::InvalidArgument(format!(
            "false positive probability must be within [0, 1], got {false_positive_probability}"
        )));
    }

    let num_bits = optimal_num_of_bits(expected_insertions, false_positive_probability);
    let num_hash_functions = optimal_num_of_hash_functions(expected_insertions, num_bits);
    Ok(BloomSizing {
        num_bits,
        num_hash_functions,
    })
}

fn optimal_num_of_bits(n: i64, p: f64) -> u64 {
    let p = if p == 0.0 { f64::from_bits(1) } else { p };
    let m = -(n as f64) * p.ln() / (LN_2 * LN_2);
    // `as` saturates, and -0.0 (n == 0) maps to 0.
    m.ceil() as u64
}

fn optimal_num_of_hash_functions(n: i64, m: u64) -> usize {
    let k = (m as f64 / n as f64 * LN_2).round();
    // 0/0 when n == 0 yields NaN, which also lands here.
    if k.is_nan() || k < 1.0 {
        1
    } else {
        k as usize
    }
}
