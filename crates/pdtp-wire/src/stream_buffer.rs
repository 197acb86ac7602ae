use bytes::{Bytes, BytesMut};

use crate::error::WireError;

/// Append-only accumulator for bytes arriving from the transport.
///
/// Transport chunks land here via [`append`](Self::append) and the frame
/// layer takes bytes back out the front via [`peek`](Self::peek) and
/// [`consume`](Self::consume). Strictly FIFO: there is no rewind and no
/// random access, which is what lets arbitrary chunk boundaries disappear
/// at this layer: two deliveries of the same bytes are indistinguishable
/// once buffered.
///
/// Backed by [`BytesMut`], so `consume` hands out cheap shared slices
/// instead of copying, and repeated append/consume cycles reuse the
/// allocation.
#[derive(Debug, Default)]
pub struct StreamBuffer {
    buf: BytesMut,
}

impl StreamBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: BytesMut::with_capacity(8 * 1024),
        }
    }

    /// Append a transport chunk to the back of the buffer.
    pub fn append(&mut self, chunk: &[u8]) {
        self.buf.extend_from_slice(chunk);
    }

    /// Borrow the first `n` buffered bytes without consuming them.
    ///
    /// Returns `None` when fewer than `n` bytes are buffered.
    #[must_use]
    pub fn peek(&self, n: usize) -> Option<&[u8]> {
        self.buf.get(..n)
    }

    /// Remove and return the first `n` buffered bytes.
    ///
    /// # Errors
    ///
    /// [`WireError::InsufficientData`] when fewer than `n` bytes are
    /// buffered. The buffer is left untouched in that case.
    pub fn consume(&mut self, n: usize) -> Result<Bytes, WireError> {
        if self.buf.len() < n {
            return Err(WireError::InsufficientData {
                requested: n,
                available: self.buf.len(),
            });
        }
        Ok(self.buf.split_to(n).freeze())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_then_consume_returns_same_bytes() {
        let mut buf = StreamBuffer::new();
        buf.append(b"hello world");
        let out = buf.consume(5).unwrap();
        assert_eq!(&out[..], b"hello");
        assert_eq!(buf.len(), 6);
    }

    #[test]
    fn consume_past_end_fails_and_preserves_buffer() {
        let mut buf = StreamBuffer::new();
        buf.append(b"abc");
        let err = buf.consume(4).unwrap_err();
        assert!(matches!(
            err,
            WireError::InsufficientData {
                requested: 4,
                available: 3
            }
        ));
        // Failed consume must not have taken anything.
        assert_eq!(buf.len(), 3);
        assert_eq!(&buf.consume(3).unwrap()[..], b"abc");
    }

    #[test]
    fn peek_does_not_consume() {
        let mut buf = StreamBuffer::new();
        buf.append(&[1, 2, 3, 4]);
        assert_eq!(buf.peek(2), Some(&[1u8, 2][..]));
        assert_eq!(buf.peek(2), Some(&[1u8, 2][..]));
        assert_eq!(buf.len(), 4);
        assert_eq!(buf.peek(5), None);
    }

    #[test]
    fn chunk_boundaries_are_invisible() {
        // Same bytes delivered whole vs. one at a time must read back
        // identically.
        let payload = b"split me anywhere";

        let mut whole = StreamBuffer::new();
        whole.append(payload);

        let mut pieces = StreamBuffer::new();
        for b in payload {
            pieces.append(std::slice::from_ref(b));
        }

        assert_eq!(
            whole.consume(payload.len()).unwrap(),
            pieces.consume(payload.len()).unwrap()
        );
    }

    #[test]
    fn consume_zero_is_empty_slice() {
        let mut buf = StreamBuffer::new();
        let out = buf.consume(0).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn interleaved_append_consume() {
        let mut buf = StreamBuffer::new();
        buf.append(b"ab");
        assert_eq!(&buf.consume(1).unwrap()[..], b"a");
        buf.append(b"cd");
        assert_eq!(&buf.consume(3).unwrap()[..], b"bcd");
        assert!(buf.is_empty());
    }
}
