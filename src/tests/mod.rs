//! Crate-level test modules.
//!
//! Unit tests live next to the code they exercise; this module holds the tests
//! that cut across modules (configuration loading, error conversions) and the
//! fixtures they share.


pub use test_utils::TestFixture;
