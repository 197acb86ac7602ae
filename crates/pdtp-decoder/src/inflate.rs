//! DEFLATE decompression with the stream's trust-the-output policy.
//!
//! Payload compression on this protocol is the zlib container
//! (RFC 1950), but servers routinely close a record's compressed stream
//! without the final checksum. The policy for that lives in one place,
//! [`inflate`]: success is defined by output produced, not by the
//! decoder's completion signal.

use std::io::Read;

use flate2::read::ZlibDecoder;

/// Errors from [`inflate`].
#[derive(Debug, thiserror::Error)]
pub enum InflateError {
    /// The stream failed before producing any output.
    ///
    /// Distinct from a trailing failure: with zero bytes out there is
    /// nothing to trust, so this is a real reconstruction failure.
    #[error("deflate stream produced no output: {source}")]
    Corrupt {
        #[source]
        source: std::io::Error,
    },

    /// Decompressed size exceeded the safety limit.
    ///
    /// Prevents decompression bombs: a few KiB of input can inflate to
    /// gigabytes and the declared metadata lengths only cover the
    /// compressed side.
    #[error("decompressed output exceeds limit of {limit} bytes")]
    DecompressionBomb { limit: usize },
}

/// Inflate a zlib stream, tolerating a broken tail.
///
/// Contract:
///
/// - empty input is a valid empty stream and yields empty output;
/// - a decoder error after output was produced is treated as a trailing
///   completion failure; the bytes already inflated are returned and
///   the error is logged at debug level;
/// - a decoder error before any output is [`InflateError::Corrupt`].
///
/// # Errors
///
/// [`InflateError::Corrupt`] or [`InflateError::DecompressionBomb`].
pub fn inflate(input: &[u8], max_out: usize) -> Result<Vec<u8>, InflateError> {
    if input.is_empty() {
        return Ok(Vec::new());
    }

    let mut decoder = ZlibDecoder::new(input);
    let mut out = Vec::new();
    let mut chunk = [0u8; 16 * 1024];

    loop {
        match decoder.read(&mut chunk) {
            Ok(0) => return Ok(out),
            Ok(n) => {
                if out.len() + n > max_out {
                    return Err(InflateError::DecompressionBomb { limit: max_out });
                }
                out.extend_from_slice(&chunk[..n]);
            }
            Err(err) if err.kind() == std::io::ErrorKind::Interrupted => {}
            Err(err) if !out.is_empty() => {
                tracing::debug!(
                    produced = out.len(),
                    error = %err,
                    "ignoring trailing deflate failure, keeping inflated bytes"
                );
                return Ok(out);
            }
            Err(err) => return Err(InflateError::Corrupt { source: err }),
        }
    }
}
