// Copyright (c) 2025 Bloomkit Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Self-contained bloom filter over an in-process bit array.
//!
//! This is the simpler sibling of [`crate::data_structures::bloom_filter`]: no
//! pluggable store, no context, no errors. Memory is `bits_per_key * expected_len`
//! bits, and ten bits per key is usually enough for a false positive rate below 2%.
//!
//! Positions are computed differently from the pluggable filter, so the two
//! are not interchangeable.

mod filter;
mod hash;

pub use filter::BitVectorBloom;
