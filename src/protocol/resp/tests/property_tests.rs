// Copyright (c) 2025 Bloomkit Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Property-based tests for RESP encoding and decoding.

use proptest::prelude::*;

use crate::protocol::resp::{read_reply, Command, Reply};

fn decode(input: &[u8]) -> crate::error::BloomResult<Reply> {
    let mut reader = input;
    tokio_test::block_on(read_reply(&mut reader))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// An encoded request is itself a valid RESP array of bulk strings.
    #[test]
    fn test_request_decodes_as_bulk_array(
        name in "[A-Z]{1,12}",
        args in proptest::collection::vec(proptest::collection::vec(any::<u8>(), 0..64), 0..8)
    ) {
        let command = Command::new(name.clone()).args(args.iter().map(|a| a.as_slice()));
        let decoded = decode(&command.to_bytes()).unwrap();

        let mut expected = vec![Reply::Bulk(name.into_bytes())];
        expected.extend(args.into_iter().map(Reply::Bulk));
        prop_assert_eq!(decoded, Reply::Array(expected));
    }

    /// Any i64 survives the integer reply path.
    #[test]
    fn test_integer_replies(n in any::<i64>()) {
        let frame = format!(":{n}\r\n");
        prop_assert_eq!(decode(frame.as_bytes()).unwrap(), Reply::Integer(n));
    }

    /// Arbitrary bytes never panic the decoder.
    #[test]
    fn test_decoder_never_panics(input in proptest::collection::vec(any::<u8>(), 0..256)) {
        let _ = decode(&input);
    }
}
