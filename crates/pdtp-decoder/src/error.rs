use pdtp_types::TypeError;
use pdtp_wire::WireError;

use crate::raster::RasterError;

/// Errors surfaced while decoding a record stream.
///
/// Two severities share this enum and
/// [`is_record_scoped`](DecodeError::is_record_scoped) tells them apart:
/// a record-scoped error spoils one record while the stream keeps
/// draining frames, a stream-fatal error ends the run.
///
/// Error hierarchy:
///
/// ```text
///   DecodeError
///   ├── record-scoped (stream continues)
///   │   ├── Metadata(TypeError)          ← JSON body malformed
///   │   ├── UnknownRecordType            ← unrecognized or reserved id
///   │   └── Reconstruction(RasterError)  ← inflate / JPEG / PNG failure
///   └── stream-fatal (stream ends)
///       ├── Wire(WireError)              ← framing unusable
///       ├── TransportEnded               ← EOF inside a frame or payload
///       ├── Cancelled                    ← caller aborted the stream
///       └── Io(std::io::Error)           ← transport read failure
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// A frame's JSON metadata body failed deserialization.
    ///
    /// The frame envelope was consumed in full, so the next frame is
    /// still findable. For image and font records the trailing raw
    /// payload lengths were inside the unreadable body; those payload
    /// bytes stay in the stream and will be misread as frames.
    #[error(transparent)]
    Metadata(#[from] TypeError),

    /// The frame's type byte maps to no known record.
    ///
    /// Covers the reserved 0xFF error id as well as ids from newer
    /// servers. The frame body was consumed, so this costs one record,
    /// not the stream.
    #[error("unknown record type {type_id:#04X}")]
    UnknownRecordType { type_id: u8 },

    /// Image payload reconstruction failed.
    ///
    /// The raw payload bytes were already consumed from the stream, so
    /// framing is intact and decoding continues with the next frame.
    #[error("image reconstruction failed: {0}")]
    Reconstruction(#[from] RasterError),

    /// A frame-envelope error from `pdtp-wire`.
    #[error(transparent)]
    Wire(#[from] WireError),

    /// The transport ended inside a frame or raw payload.
    ///
    /// Only surfaced when [`DecodeOptions::strict_truncation`] is set;
    /// the lenient default drops the dangling tail and ends the stream
    /// normally.
    ///
    /// [`DecodeOptions::strict_truncation`]: crate::DecodeOptions
    #[error("transport ended mid-record: {buffered} of {needed} bytes buffered")]
    TransportEnded { buffered: usize, needed: usize },

    /// The cancellation token fired.
    ///
    /// Yielded exactly once, with no partially read record dispatched
    /// before it.
    #[error("stream cancelled")]
    Cancelled,

    /// An I/O error from the underlying transport reader.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DecodeError {
    /// Whether this error spoils only the current record.
    ///
    /// Record-scoped errors leave the frame envelope aligned; callers
    /// report them and keep consuming the stream. Everything else means
    /// no further records can be produced.
    #[must_use]
    pub fn is_record_scoped(&self) -> bool {
        matches!(
            self,
            Self::Metadata(_) | Self::UnknownRecordType { .. } | Self::Reconstruction(_)
        )
    }
}
