//! Protocol module for bloomkit.
//!
//! This module implements the wire protocols spoken to remote bit stores.
//! Currently that is RESP, the request/reply protocol of Redis and its
//! compatible servers, used to drive `BITFIELD` for the remote bloom filter
//! backend.

pub mod resp;
