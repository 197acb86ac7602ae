//! The streaming decode loop.
//!
//! Bytes come in from any [`AsyncRead`] transport in whatever chunks the
//! network felt like; typed payloads go out one at a time, in stream
//! order. The loop is a single accumulate/drain cycle:
//!
//! ```text
//!   transport read ──▶ StreamBuffer ──▶ Frame::parse ──▶ metadata decode
//!                           ▲                                  │
//!                           └── pull raw payloads ◀────────────┘
//!                               (image data, mask, font bytes)
//! ```
//!
//! Chunk boundaries disappear inside the buffer, so decoding the stream
//! byte-at-a-time and all-at-once yields identical payload sequences.

use bytes::Bytes;
use pdtp_types::{
    ChunkPayload, FontMetadata, ImageMetadata, PageMetadata, PathMetadata, RecordKind,
    TextMetadata,
};
use pdtp_wire::{Frame, FrameHeader, StreamBuffer};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio_util::sync::CancellationToken;

use crate::error::DecodeError;
use crate::raster;

/// Transport read size. Large enough to swallow a typical HTTP chunk in
/// one call, small enough not to matter when it isn't.
const READ_CHUNK: usize = 64 * 1024;

/// Tuning knobs for a decode run.
#[derive(Clone, Debug)]
pub struct DecodeOptions {
    /// Upper bound on a single frame's metadata body. Metadata is small
    /// JSON; anything near this limit is a corrupt length field.
    pub max_frame_len: usize,

    /// Surface [`DecodeError::TransportEnded`] when the stream ends
    /// inside a frame or raw payload. The default quietly drops the
    /// dangling tail and ends the stream, which is what document viewers
    /// want when a server closes a range response early.
    pub strict_truncation: bool,

    /// Cooperative cancellation. Fires at the next transport read; the
    /// stream yields [`DecodeError::Cancelled`] once and then ends.
    pub cancel: CancellationToken,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_frame_len: 16 * 1024 * 1024,
            strict_truncation: false,
            cancel: CancellationToken::new(),
        }
    }
}

/// Streaming record decoder that yields payloads one at a time without
/// buffering the whole document.
///
/// Reads incrementally from any `AsyncRead` source (TCP sockets, HTTP
/// response bodies, files, in-memory slices). Backpressure is inherent:
/// nothing is read or reconstructed until the caller awaits
/// [`next`](Self::next), and an image is fully reconstructed before the
/// following frame is looked at.
///
/// # Example
///
/// ```rust,no_run
/// use pdtp_decoder::RecordStream;
/// use tokio::io::AsyncRead;
///
/// async fn drain(reader: impl AsyncRead + Unpin) {
///     let mut stream = RecordStream::new(reader);
///     while let Some(result) = stream.next().await {
///         match result {
///             Ok(payload) => { /* hand to the consumer */ }
///             Err(err) if err.is_record_scoped() => { /* report, keep going */ }
///             Err(_fatal) => break,
///         }
///     }
/// }
/// ```
pub struct RecordStream<R> {
    reader: R,
    buf: StreamBuffer,
    opts: DecodeOptions,
    state: StreamState,
    /// Scratch space for transport reads, reused across the run.
    scratch: Vec<u8>,
}

/// The stream is either producing or it is done. There is no header
/// phase: frames start at byte zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StreamState {
    Running,
    Finished,
}

impl<R: AsyncRead + Unpin> RecordStream<R> {
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, DecodeOptions::default())
    }

    #[must_use]
    pub fn with_options(reader: R, opts: DecodeOptions) -> Self {
        Self {
            reader,
            buf: StreamBuffer::new(),
            opts,
            state: StreamState::Running,
            scratch: vec![0u8; READ_CHUNK],
        }
    }

    /// Decode the next record from the stream.
    ///
    /// Returns `Some(Ok(payload))` per decoded record, in stream order.
    /// `Some(Err(e))` with a record-scoped error spoils only that
    /// record; keep calling. Any other error is final: it is yielded
    /// once and the next call returns `None`.
    ///
    /// `None` means the stream is over. With the lenient truncation
    /// default this includes a transport that died mid-record; the
    /// partial tail is logged and discarded.
    pub async fn next(&mut self) -> Option<Result<ChunkPayload, DecodeError>> {
        if self.state == StreamState::Finished {
            return None;
        }

        loop {
            // Drain one complete frame if the buffer holds it.
            match Frame::parse(&mut self.buf, self.opts.max_frame_len) {
                Ok(Some(frame)) => match self.decode_frame(frame).await {
                    Ok(payload) => return Some(Ok(payload)),
                    Err(err) if err.is_record_scoped() => return Some(Err(err)),
                    Err(DecodeError::TransportEnded { buffered, needed })
                        if !self.opts.strict_truncation =>
                    {
                        self.state = StreamState::Finished;
                        tracing::debug!(
                            buffered,
                            needed,
                            "discarding record truncated at end of stream"
                        );
                        return None;
                    }
                    Err(err) => return Some(Err(self.finish_with(err))),
                },
                Ok(None) => {}
                Err(err) => return Some(Err(self.finish_with(err.into()))),
            }

            // Not enough buffered for the next frame: read more.
            match self.fill().await {
                Ok(0) => return self.finish_at_eof(),
                Ok(_) => {}
                Err(err) => return Some(Err(self.finish_with(err))),
            }
        }
    }

    /// One transport read, racing the cancellation token. Returns the
    /// number of bytes appended; 0 is end-of-stream.
    async fn fill(&mut self) -> Result<usize, DecodeError> {
        // Biased so a cancelled token beats a readable transport. Records
        // already buffered still drain; the token stops further reads.
        let read = tokio::select! {
            biased;
            () = self.opts.cancel.cancelled() => return Err(DecodeError::Cancelled),
            read = self.reader.read(&mut self.scratch) => read?,
        };
        if read > 0 {
            self.buf.append(&self.scratch[..read]);
        }
        Ok(read)
    }

    /// Take exactly `n` raw payload bytes off the stream, reading as
    /// needed. EOF before `n` bytes is `TransportEnded`.
    async fn pull_exact(&mut self, n: usize) -> Result<Bytes, DecodeError> {
        while self.buf.len() < n {
            if self.fill().await? == 0 {
                return Err(DecodeError::TransportEnded {
                    buffered: self.buf.len(),
                    needed: n,
                });
            }
        }
        Ok(self.buf.consume(n)?)
    }

    /// Decode one framed record, pulling trailing raw payloads where the
    /// record type carries them.
    ///
    /// Raw payload pulls happen only after the metadata parsed, since
    /// the payload lengths live inside the metadata. A malformed image
    /// or font body therefore leaves its payload bytes in the stream to
    /// be misread as frames, the cost of a length field inside the
    /// body, shared by every decoder of this wire format.
    async fn decode_frame(&mut self, frame: Frame) -> Result<ChunkPayload, DecodeError> {
        match RecordKind::from_wire_id(frame.record_type) {
            RecordKind::Page => Ok(ChunkPayload::Page(PageMetadata::from_json_body(
                &frame.body,
            )?)),
            RecordKind::Text => Ok(ChunkPayload::Text(TextMetadata::from_json_body(
                &frame.body,
            )?)),
            RecordKind::Path => Ok(ChunkPayload::Path(PathMetadata::from_json_body(
                &frame.body,
            )?)),
            RecordKind::Font => {
                let meta = FontMetadata::from_json_body(&frame.body)?;
                let bytes = self.pull_exact(meta.length).await?;
                Ok(ChunkPayload::Font { meta, bytes })
            }
            RecordKind::Image => {
                let meta = ImageMetadata::from_json_body(&frame.body)?;
                let data = self.pull_exact(meta.length).await?;
                let mask = self.pull_exact(meta.mask_length).await?;
                let asset = raster::reconstruct(&meta, data, &mask)?;
                Ok(ChunkPayload::Image { meta, asset })
            }
            RecordKind::Error | RecordKind::Unknown(_) => Err(DecodeError::UnknownRecordType {
                type_id: frame.record_type,
            }),
        }
    }

    fn finish_with(&mut self, err: DecodeError) -> DecodeError {
        self.state = StreamState::Finished;
        err
    }

    /// End-of-stream between frames. An empty buffer is a clean end; a
    /// non-empty one is a dangling partial frame handled per the
    /// truncation policy.
    fn finish_at_eof(&mut self) -> Option<Result<ChunkPayload, DecodeError>> {
        self.state = StreamState::Finished;

        if self.buf.is_empty() {
            return None;
        }

        let needed = FrameHeader::peek(&self.buf)
            .map_or(pdtp_wire::FRAME_HEADER_SIZE, |h| h.frame_len());

        if self.opts.strict_truncation {
            return Some(Err(DecodeError::TransportEnded {
                buffered: self.buf.len(),
                needed,
            }));
        }

        tracing::debug!(
            buffered = self.buf.len(),
            needed,
            "discarding dangling partial frame at end of stream"
        );
        None
    }
}
