// Copyright (c) 2025 Bloomkit Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Unit tests for the RESP client against scripted streams.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_test::io::Builder;

use crate::context::Context;
use crate::error::{BloomError, CancelReason, ProtocolError, TransportError};
use crate::protocol::resp::{BitFieldOp, Command, Reply, RespClient};

const SET_BIT_5: &[u8] =
    b"*6\r\n$8\r\nBITFIELD\r\n$3\r\nkey\r\n$3\r\nset\r\n$2\r\nu1\r\n$1\r\n5\r\n$1\r\n1\r\n";

#[tokio::test]
async fn test_bitfield_set_round_trip() {
    let stream = Builder::new().write(SET_BIT_5).read(b"*1\r\n:0\r\n").build();
    let mut client = RespClient::new(stream);

    let values = client
        .bitfield(&Context::background(), "key", &[BitFieldOp::Set(5, true)])
        .await
        .unwrap();
    assert_eq!(values, vec![0]);
    assert!(!client.is_poisoned());
}

#[tokio::test]
async fn test_execute_returns_decoded_reply() {
    let stream = Builder::new()
        .write(b"*3\r\n$3\r\nSET\r\n$1\r\nk\r\n$1\r\n1\r\n")
        .read(b"+OK\r\n")
        .write(b"*2\r\n$3\r\nGET\r\n$1\r\nk\r\n")
        .read(b"$1\r\n1\r\n")
        .build();
    let mut client = RespClient::new(stream);
    let ctx = Context::with_timeout(Duration::from_secs(2));

    let reply = client
        .execute(&ctx, &Command::new("SET").arg("k").arg(1))
        .await
        .unwrap();
    assert_eq!(reply.into_string().unwrap(), "OK");

    let reply = client.execute(&ctx, &Command::new("GET").arg("k")).await.unwrap();
    assert_eq!(reply.as_i64().unwrap(), 1);
}

#[tokio::test]
async fn test_server_error_surfaces_text_and_keeps_client_usable() {
    let stream = Builder::new()
        .write(b"*1\r\n$3\r\nDEL\r\n")
        .read(b"-ERR wrong number of arguments for 'del' command\r\n")
        .write(b"*1\r\n$4\r\nPING\r\n")
        .read(b"+PONG\r\n")
        .build();
    let mut client = RespClient::new(stream);
    let ctx = Context::background();

    let err = client.execute(&ctx, &Command::new("DEL")).await.unwrap_err();
    assert!(err
        .to_string()
        .contains("wrong number of arguments for 'del' command"));
    assert!(!client.is_poisoned());

    let reply = client.execute(&ctx, &Command::new("PING")).await.unwrap();
    assert_eq!(reply, Reply::Simple("PONG".into()));
}

#[tokio::test]
async fn test_malformed_reply_poisons_client() {
    let stream = Builder::new()
        .write(b"*1\r\n$4\r\nPING\r\n")
        .read(b"?garbage\r\n")
        .build();
    let mut client = RespClient::new(stream);
    let ctx = Context::background();

    let err = client.execute(&ctx, &Command::new("PING")).await.unwrap_err();
    assert!(matches!(
        err,
        BloomError::Protocol(ProtocolError::UnknownType { byte: b'?' })
    ));
    assert!(client.is_poisoned());

    let err = client.execute(&ctx, &Command::new("PING")).await.unwrap_err();
    assert!(matches!(err, BloomError::Transport(TransportError::Poisoned(_))));
}

#[tokio::test]
async fn test_bitfield_reply_of_wrong_length_is_protocol_error() {
    let get_two = b"*8\r\n$8\r\nBITFIELD\r\n$3\r\nkey\r\n$3\r\nget\r\n$2\r\nu1\r\n$1\r\n1\r\n$3\r\nget\r\n$2\r\nu1\r\n$1\r\n2\r\n";
    let stream = Builder::new().write(get_two).read(b"*1\r\n:1\r\n").build();
    let mut client = RespClient::new(stream);

    let err = client
        .bitfield(
            &Context::background(),
            "key",
            &[BitFieldOp::Get(1), BitFieldOp::Get(2)],
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        BloomError::Protocol(ProtocolError::UnexpectedReply { .. })
    ));
}

#[tokio::test]
async fn test_peer_close_is_connection_closed() {
    let (client_end, mut server_end) = tokio::io::duplex(1024);
    let mut client = RespClient::new(client_end);

    let server = tokio::spawn(async move {
        let mut request = vec![0u8; b"*1\r\n$4\r\nPING\r\n".len()];
        server_end.read_exact(&mut request).await.unwrap();
        drop(server_end);
        request
    });

    let err = client
        .execute(&Context::background(), &Command::new("PING"))
        .await
        .unwrap_err();
    assert!(matches!(err, BloomError::Transport(TransportError::ConnectionClosed)));
    assert_eq!(server.await.unwrap(), b"*1\r\n$4\r\nPING\r\n".to_vec());
}

#[tokio::test(start_paused = true)]
async fn test_deadline_interrupts_silent_server() {
    let (client_end, _server_end) = tokio::io::duplex(1024);
    let mut client = RespClient::new(client_end);

    let ctx = Context::with_timeout(Duration::from_millis(100));
    let err = client.execute(&ctx, &Command::new("PING")).await.unwrap_err();
    assert!(matches!(
        err,
        BloomError::Cancelled(CancelReason::DeadlineExceeded)
    ));
    assert!(client.is_poisoned());
}

#[tokio::test]
async fn test_cancelled_context_sends_nothing() {
    let (client_end, mut server_end) = tokio::io::duplex(1024);
    let mut client = RespClient::new(client_end);

    let (ctx, handle) = Context::with_cancel();
    handle.cancel();
    let err = client.execute(&ctx, &Command::new("PING")).await.unwrap_err();
    assert!(err.is_cancelled());
    assert!(!client.is_poisoned());

    // Nothing reached the server, so the connection is still aligned.
    let server = tokio::spawn(async move {
        let mut request = vec![0u8; b"*1\r\n$4\r\nPING\r\n".len()];
        server_end.read_exact(&mut request).await.unwrap();
        server_end.write_all(b"+PONG\r\n").await.unwrap();
        request
    });
    let reply = client
        .execute(&Context::background(), &Command::new("PING"))
        .await
        .unwrap();
    assert_eq!(reply, Reply::Simple("PONG".into()));
    assert_eq!(server.await.unwrap(), b"*1\r\n$4\r\nPING\r\n".to_vec());
}
