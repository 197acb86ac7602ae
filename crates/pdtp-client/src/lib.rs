#![warn(clippy::pedantic)]

pub mod client;
pub mod error;
pub mod options;
pub mod sink;

pub use client::{PdtpClient, StreamOutcome, StreamSummary};
pub use error::ClientError;
pub use options::{FetchOptions, PDTP_HEADER, PageRange};
pub use sink::{ErrorSink, LogSink, RecordConsumer};

// The decode layer callers meet through the sink and fatal errors.
pub use pdtp_decoder::DecodeError;
