use bytes::Bytes;

use crate::error::WireError;
use crate::stream_buffer::StreamBuffer;

/// Known record type IDs.
///
/// These are the semantic type tags that appear on the wire. The
/// `pdtp-types` crate defines the typed metadata struct for each.
pub mod record_type {
    pub const PAGE: u8 = 0x00;
    pub const TEXT: u8 = 0x01;
    pub const IMAGE: u8 = 0x02;
    pub const FONT: u8 = 0x03;
    pub const PATH: u8 = 0x04;
    /// Reserved for server-side error reports. Decoders skip it like any
    /// other unrecognized id.
    pub const ERROR: u8 = 0xFF;
}

/// Size of the fixed frame header in bytes: 1 type byte + 4 length bytes.
pub const FRAME_HEADER_SIZE: usize = 5;

/// The fixed 5-byte prefix of every frame.
///
/// ```text
/// ┌─────────────────────────────────────────────────┐
/// │ record_type  (uint8, 1 byte)                    │
/// │ body_len     (uint32, 4 bytes, big-endian)      │
/// └─────────────────────────────────────────────────┘
/// ```
///
/// `body_len` counts only the metadata body. An image or font record's
/// raw payload follows the frame as separate in-stream bytes whose length
/// is declared inside the metadata, not here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameHeader {
    pub record_type: u8,
    pub body_len: u32,
}

impl FrameHeader {
    /// Read the header at the front of the buffer without consuming it.
    ///
    /// Returns `None` when fewer than [`FRAME_HEADER_SIZE`] bytes are
    /// buffered.
    #[must_use]
    pub fn peek(buf: &StreamBuffer) -> Option<Self> {
        let head = buf.peek(FRAME_HEADER_SIZE)?;
        Some(Self {
            record_type: head[0],
            body_len: u32::from_be_bytes([head[1], head[2], head[3], head[4]]),
        })
    }

    /// Total on-wire size of the frame this header describes.
    #[must_use]
    pub fn frame_len(&self) -> usize {
        FRAME_HEADER_SIZE + self.body_len as usize
    }
}

/// The wire envelope wrapping every record's metadata body.
///
/// ```text
/// ┌─────────────────────────────────────────────────┐
/// │ record_type  (uint8, 1 byte)                    │
/// │ body_len     (uint32, 4 bytes, big-endian)      │
/// │ body         [body_len bytes, UTF-8 JSON]       │
/// └─────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// The semantic record type (PAGE=0x00, TEXT=0x01, etc.).
    pub record_type: u8,

    /// The raw body bytes (`body_len` bytes from the wire).
    pub body: Bytes,
}

impl Frame {
    /// Try to extract one complete frame from the front of the buffer.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(frame))`: a complete frame was buffered; exactly
    ///   `FRAME_HEADER_SIZE + body_len` bytes were consumed.
    /// - `Ok(None)`: the buffer holds a partial header or partial body.
    ///   Nothing is consumed; call again after more bytes arrive. The
    ///   result is identical however the bytes were chunked.
    ///
    /// # Errors
    ///
    /// [`WireError::FrameTooLarge`] when the header declares a body
    /// beyond `max_body_len`. The buffer is left as-is; framing cannot be
    /// recovered past a length field that big, so the stream is done.
    pub fn parse(buf: &mut StreamBuffer, max_body_len: usize) -> Result<Option<Self>, WireError> {
        let Some(header) = FrameHeader::peek(buf) else {
            return Ok(None);
        };

        let body_len = header.body_len as usize;
        if body_len > max_body_len {
            return Err(WireError::FrameTooLarge {
                length: body_len,
                limit: max_body_len,
            });
        }

        if buf.len() < header.frame_len() {
            return Ok(None);
        }

        buf.consume(FRAME_HEADER_SIZE)?;
        let body = buf.consume(body_len)?;

        Ok(Some(Self {
            record_type: header.record_type,
            body,
        }))
    }

    /// Write this frame to the provided writer.
    ///
    /// Counterpart of [`parse`](Self::parse) used by fixtures, benches
    /// and the fuzz corpus; the decoder itself never writes.
    ///
    /// # Errors
    ///
    /// - [`WireError::FrameTooLarge`] if the body does not fit a u32
    ///   length field.
    /// - [`WireError::Io`] on writer failure.
    pub fn write_to(&self, w: &mut impl std::io::Write) -> Result<usize, WireError> {
        let body_len = u32::try_from(self.body.len()).map_err(|_| WireError::FrameTooLarge {
            length: self.body.len(),
            limit: u32::MAX as usize,
        })?;

        w.write_all(&[self.record_type])?;
        w.write_all(&body_len.to_be_bytes())?;
        w.write_all(&self.body)?;

        Ok(FRAME_HEADER_SIZE + self.body.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_LIMIT: usize = usize::MAX;

    /// Helper: write a frame to a Vec and return the bytes.
    fn write_frame(frame: &Frame) -> Vec<u8> {
        let mut buf = Vec::new();
        frame.write_to(&mut buf).unwrap();
        buf
    }

    fn buffer_with(bytes: &[u8]) -> StreamBuffer {
        let mut buf = StreamBuffer::new();
        buf.append(bytes);
        buf
    }

    #[test]
    fn roundtrip_page_frame() {
        let frame = Frame {
            record_type: record_type::PAGE,
            body: Bytes::from_static(br#"{"width":612,"height":792,"page":1}"#),
        };
        let bytes = write_frame(&frame);
        let mut buf = buffer_with(&bytes);

        let parsed = Frame::parse(&mut buf, NO_LIMIT).unwrap().unwrap();
        assert_eq!(parsed, frame);
        assert!(buf.is_empty());
    }

    #[test]
    fn length_field_is_big_endian() {
        // 256-byte body: length bytes must read 00 00 01 00.
        let frame = Frame {
            record_type: record_type::TEXT,
            body: Bytes::from(vec![b'x'; 256]),
        };
        let bytes = write_frame(&frame);
        assert_eq!(&bytes[1..5], &[0x00, 0x00, 0x01, 0x00]);

        let mut buf = buffer_with(&bytes);
        let parsed = Frame::parse(&mut buf, NO_LIMIT).unwrap().unwrap();
        assert_eq!(parsed.body.len(), 256);
    }

    #[test]
    fn empty_buffer_is_incomplete() {
        let mut buf = StreamBuffer::new();
        assert!(Frame::parse(&mut buf, NO_LIMIT).unwrap().is_none());
    }

    #[test]
    fn partial_header_is_incomplete() {
        let mut buf = buffer_with(&[record_type::PAGE, 0x00, 0x00]);
        assert!(Frame::parse(&mut buf, NO_LIMIT).unwrap().is_none());
        // Nothing consumed while waiting.
        assert_eq!(buf.len(), 3);
    }

    #[test]
    fn partial_body_is_incomplete_until_last_byte() {
        let frame = Frame {
            record_type: record_type::PATH,
            body: Bytes::from_static(b"0123456789"),
        };
        let bytes = write_frame(&frame);

        let mut buf = StreamBuffer::new();
        buf.append(&bytes[..bytes.len() - 1]);
        assert!(Frame::parse(&mut buf, NO_LIMIT).unwrap().is_none());
        assert_eq!(buf.len(), bytes.len() - 1);

        buf.append(&bytes[bytes.len() - 1..]);
        let parsed = Frame::parse(&mut buf, NO_LIMIT).unwrap().unwrap();
        assert_eq!(parsed, frame);
    }

    #[test]
    fn zero_length_body() {
        let frame = Frame {
            record_type: record_type::FONT,
            body: Bytes::new(),
        };
        let bytes = write_frame(&frame);
        assert_eq!(bytes.len(), FRAME_HEADER_SIZE);

        let mut buf = buffer_with(&bytes);
        let parsed = Frame::parse(&mut buf, NO_LIMIT).unwrap().unwrap();
        assert!(parsed.body.is_empty());
    }

    #[test]
    fn oversize_body_rejected() {
        let mut buf = buffer_with(&[record_type::IMAGE, 0xFF, 0xFF, 0xFF, 0xFF]);
        let err = Frame::parse(&mut buf, 1024).unwrap_err();
        assert!(matches!(err, WireError::FrameTooLarge { limit: 1024, .. }));
    }

    #[test]
    fn body_at_limit_is_accepted() {
        let frame = Frame {
            record_type: record_type::TEXT,
            body: Bytes::from(vec![0u8; 64]),
        };
        let mut buf = buffer_with(&write_frame(&frame));
        assert!(Frame::parse(&mut buf, 64).unwrap().is_some());
    }

    #[test]
    fn frames_drain_sequentially() {
        let first = Frame {
            record_type: record_type::PAGE,
            body: Bytes::from_static(b"first"),
        };
        let second = Frame {
            record_type: record_type::TEXT,
            body: Bytes::from_static(b"second"),
        };

        let mut bytes = Vec::new();
        first.write_to(&mut bytes).unwrap();
        second.write_to(&mut bytes).unwrap();

        let mut buf = buffer_with(&bytes);
        assert_eq!(Frame::parse(&mut buf, NO_LIMIT).unwrap().unwrap(), first);
        assert_eq!(Frame::parse(&mut buf, NO_LIMIT).unwrap().unwrap(), second);
        assert!(Frame::parse(&mut buf, NO_LIMIT).unwrap().is_none());
        assert!(buf.is_empty());
    }

    #[test]
    fn reserved_error_type_is_framed_normally() {
        let frame = Frame {
            record_type: record_type::ERROR,
            body: Bytes::from_static(br#"{"message":"boom"}"#),
        };
        let mut buf = buffer_with(&write_frame(&frame));
        let parsed = Frame::parse(&mut buf, NO_LIMIT).unwrap().unwrap();
        assert_eq!(parsed.record_type, record_type::ERROR);
    }

    #[test]
    fn header_peek_reports_frame_length() {
        let frame = Frame {
            record_type: record_type::IMAGE,
            body: Bytes::from_static(b"{}"),
        };
        let buf = buffer_with(&write_frame(&frame));

        let header = FrameHeader::peek(&buf).unwrap();
        assert_eq!(header.record_type, record_type::IMAGE);
        assert_eq!(header.body_len, 2);
        assert_eq!(header.frame_len(), FRAME_HEADER_SIZE + 2);
    }
}
