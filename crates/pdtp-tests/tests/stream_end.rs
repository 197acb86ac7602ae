//! End-of-stream behaviour: truncation policy and cancellation.
//!
//! A server can close the connection anywhere. The default policy keeps
//! every complete record and silently drops a dangling tail; strict mode
//! turns the same tail into a `TransportEnded` report. Cancellation cuts
//! the stream at the next transport read without corrupting anything
//! already dispatched.

use std::io::Cursor;

use pdtp_decoder::{DecodeError, DecodeOptions, RecordStream};
use pdtp_tests::{StreamBuilder, decode_all, decode_all_with};
use pdtp_types::ChunkPayload;
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;

fn truncated_font_stream() -> Vec<u8> {
    // Font record declaring 100 payload bytes, stream ends after 60.
    StreamBuilder::new()
        .page(1, 612.0, 792.0)
        .raw_record(0x03, b"{\"fontId\": 5, \"length\": 100}")
        .raw_bytes(&[0xABu8; 60])
        .finish()
}

// ── Truncation, default policy ────────────────────────────────────────────────

#[tokio::test]
async fn dangling_header_is_dropped_silently() {
    let bytes = StreamBuilder::new()
        .page(1, 612.0, 792.0)
        .text(1, "complete")
        .raw_bytes(&[0x01, 0x00, 0x00])
        .finish();

    let (payloads, errors) = decode_all(bytes).await;

    assert_eq!(payloads.len(), 2, "complete records all arrive");
    assert!(errors.is_empty(), "lenient mode reports nothing: {errors:?}");
}

#[tokio::test]
async fn truncated_payload_is_dropped_silently() {
    let (payloads, errors) = decode_all(truncated_font_stream()).await;

    assert_eq!(payloads.len(), 1);
    assert!(matches!(payloads[0], ChunkPayload::Page(_)));
    assert!(errors.is_empty());
}

// ── Truncation, strict policy ─────────────────────────────────────────────────

#[tokio::test]
async fn strict_mode_reports_truncated_payload() {
    let opts = DecodeOptions {
        strict_truncation: true,
        ..DecodeOptions::default()
    };
    let mut stream = RecordStream::with_options(Cursor::new(truncated_font_stream()), opts);

    let first = stream.next().await.unwrap().unwrap();
    assert!(matches!(first, ChunkPayload::Page(_)));

    match stream.next().await {
        Some(Err(DecodeError::TransportEnded { buffered, needed })) => {
            assert_eq!((buffered, needed), (60, 100));
        }
        other => panic!("expected TransportEnded, got {other:?}"),
    }

    assert!(stream.next().await.is_none(), "TransportEnded is terminal");
}

#[tokio::test]
async fn strict_mode_accepts_a_clean_end() {
    let bytes = StreamBuilder::new()
        .page(1, 612.0, 792.0)
        .text(1, "done")
        .finish();

    let opts = DecodeOptions {
        strict_truncation: true,
        ..DecodeOptions::default()
    };
    let (payloads, errors) = decode_all_with(bytes, opts).await;

    assert_eq!(payloads.len(), 2);
    assert!(errors.is_empty());
}

// ── Frame length sanity bound ─────────────────────────────────────────────────

#[tokio::test]
async fn oversize_frame_is_fatal() {
    // 0x01 frame claiming a 2 MiB metadata body.
    let mut bytes = vec![0x01];
    bytes.extend_from_slice(&2_097_152u32.to_be_bytes());

    let opts = DecodeOptions {
        max_frame_len: 65_536,
        ..DecodeOptions::default()
    };
    let mut stream = RecordStream::with_options(Cursor::new(bytes), opts);

    match stream.next().await {
        Some(Err(e @ DecodeError::Wire(_))) => {
            assert!(!e.is_record_scoped(), "framing is unrecoverable");
        }
        other => panic!("expected a wire error, got {other:?}"),
    }
    assert!(stream.next().await.is_none());
}

// ── Cancellation ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn cancellation_cuts_the_stream_at_the_next_read() {
    let bytes = StreamBuilder::new()
        .page(1, 612.0, 792.0)
        .text(1, "delivered before cancel")
        .finish();

    let cancel = CancellationToken::new();
    let opts = DecodeOptions {
        cancel: cancel.clone(),
        ..DecodeOptions::default()
    };

    let (client, mut server) = tokio::io::duplex(1024);
    let mut stream = RecordStream::with_options(client, opts);

    server.write_all(&bytes).await.unwrap();

    let first = stream.next().await.unwrap().unwrap();
    let second = stream.next().await.unwrap().unwrap();
    assert!(matches!(first, ChunkPayload::Page(_)));
    assert!(matches!(second, ChunkPayload::Text(_)));

    // The server goes quiet without closing; the next read would block
    // forever. Cancelling releases it.
    cancel.cancel();

    match stream.next().await {
        Some(Err(DecodeError::Cancelled)) => {}
        other => panic!("expected Cancelled, got {other:?}"),
    }
    assert!(stream.next().await.is_none(), "cancellation is terminal");
}

#[tokio::test]
async fn pre_cancelled_token_stops_before_the_first_read() {
    let bytes = StreamBuilder::new().page(1, 612.0, 792.0).finish();

    let cancel = CancellationToken::new();
    cancel.cancel();
    let opts = DecodeOptions {
        cancel,
        ..DecodeOptions::default()
    };

    // The transport has a full record ready, but the token wins the race
    // against every read. Nothing is decoded.
    let mut stream = RecordStream::with_options(Cursor::new(bytes), opts);

    match stream.next().await {
        Some(Err(DecodeError::Cancelled)) => {}
        other => panic!("expected Cancelled, got {other:?}"),
    }
    assert!(stream.next().await.is_none());
}
