// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Conductor Contributors

use super::*;
use crate::protocol::Request;

#[tokio::test]
async fn round_trips_a_response_through_the_length_prefix() {
    let mut buf = Vec::new();
    write_response(&mut buf, &Response::Pong, std::time::Duration::from_secs(1)).await.unwrap();

    let mut cursor = std::io::Cursor::new(buf);
    let bytes = read_message(&mut cursor).await.unwrap();
    let decoded: Response = decode(&bytes).unwrap();
    assert!(matches!(decoded, Response::Pong));
}

#[tokio::test]
async fn read_message_reports_connection_closed_on_clean_eof() {
    let mut cursor = std::io::Cursor::new(Vec::<u8>::new());
    let err = read_message(&mut cursor).await.unwrap_err();
    assert!(matches!(err, ProtocolError::ConnectionClosed));
}

#[tokio::test]
async fn read_message_rejects_a_length_prefix_over_the_cap() {
    let mut buf = Vec::new();
    buf.extend_from_slice(&(MAX_MESSAGE_BYTES + 1).to_be_bytes());
    let mut cursor = std::io::Cursor::new(buf);
    let err = read_message(&mut cursor).await.unwrap_err();
    assert!(matches!(err, ProtocolError::MessageTooLarge(n) if n == MAX_MESSAGE_BYTES + 1));
}

#[tokio::test]
async fn read_envelope_times_out_on_a_stalled_connection() {
    let (mut client, mut server) = tokio::io::duplex(64);
    let read = tokio::spawn(async move { read_envelope(&mut server, std::time::Duration::from_millis(20)).await });
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    // Never write anything; the reader must give up rather than hang.
    let err = read.await.unwrap().unwrap_err();
    assert!(matches!(err, ProtocolError::Timeout));
    // Keep `client` alive until the assertion above runs.
    drop(client);
}

#[tokio::test]
async fn read_envelope_decodes_a_written_request() {
    let (mut a, mut b) = tokio::io::duplex(4096);
    let envelope = Envelope { password: "s3cret".into(), request: Request::Ping };
    let bytes = encode(&envelope).unwrap();
    write_message(&mut a, &bytes).await.unwrap();

    let decoded = read_envelope(&mut b, std::time::Duration::from_secs(1)).await.unwrap();
    assert_eq!(decoded.password, "s3cret");
    assert!(matches!(decoded.request, Request::Ping));
}
