/// Errors raised by the frame envelope layer.
///
/// Wire errors are structural: once framing is lost there is no way to
/// find the start of the next frame, so every byte that follows is
/// misaligned. Callers treat these as fatal for the whole stream rather
/// than skipping a record and continuing.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// More bytes were requested from the stream buffer than it holds.
    ///
    /// Internal to the accumulate/drain cycle; frame extraction checks
    /// buffered length before consuming, so a caller-visible occurrence
    /// indicates a bookkeeping bug, not bad input.
    #[error("insufficient buffered data: requested {requested} bytes, {available} available")]
    InsufficientData { requested: usize, available: usize },

    /// A frame header declared a body length above the configured cap.
    ///
    /// The length field is attacker-controlled input; without a cap a
    /// single corrupt header would stall the stream waiting for gigabytes
    /// that never arrive.
    #[error("frame body of {length} bytes exceeds the {limit}-byte limit")]
    FrameTooLarge { length: usize, limit: usize },

    /// I/O error while writing a frame.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
