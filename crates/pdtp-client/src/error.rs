use pdtp_decoder::DecodeError;

/// Failures that end a fetch.
///
/// Record-scoped decode problems never show up here; those go to the
/// [`ErrorSink`](crate::ErrorSink) while the fetch keeps going. This
/// enum is for the cases where no further records can arrive.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Request construction, connection, TLS or HTTP status failure.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// The decode loop hit a stream-fatal error.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}
