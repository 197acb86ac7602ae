//! The document client: one HTTP GET per document, one decoded payload
//! stream out, one consumer call per record.

use futures::TryStreamExt;
use pdtp_decoder::{DecodeError, DecodeOptions, RecordStream};
use tokio::io::AsyncRead;
use tokio_util::io::StreamReader;

use crate::error::ClientError;
use crate::options::{FetchOptions, PDTP_HEADER};
use crate::sink::{ErrorSink, RecordConsumer};

/// How a fetch ended.
///
/// Cancellation is an outcome, not an error: the caller asked for it
/// and everything delivered up to that point remains valid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StreamOutcome {
    /// The server's stream ended normally.
    Completed,
    /// The cancellation token fired mid-stream.
    Cancelled,
}

/// Per-fetch accounting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StreamSummary {
    /// Records handed to the consumer.
    pub delivered: u64,
    /// Records skipped after a record-scoped decode failure.
    pub recovered: u64,
    pub outcome: StreamOutcome,
}

/// Streaming PDTP document client over HTTP.
///
/// Holds a connection-pooling [`reqwest::Client`]; one instance serves
/// any number of sequential or concurrent fetches.
#[derive(Clone, Debug)]
pub struct PdtpClient {
    http: reqwest::Client,
}

impl PdtpClient {
    /// Build a client with a connect timeout and no overall deadline;
    /// document streams are open-ended.
    ///
    /// # Errors
    ///
    /// [`ClientError::Http`] when the TLS backend fails to initialize.
    pub fn new() -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()?;
        Ok(Self { http })
    }

    /// Wrap an existing HTTP client (custom proxy, headers, pools).
    #[must_use]
    pub fn with_http(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Fetch a document and dispatch every decoded record to `consumer`.
    ///
    /// Records arrive strictly in stream order. Record-scoped decode
    /// failures are reported to `sink` and counted as `recovered`;
    /// anything stream-fatal aborts with an error. Cancellation ends the
    /// fetch early with an `Ok` summary whose outcome says so.
    ///
    /// # Errors
    ///
    /// [`ClientError::Http`] for request or status failures,
    /// [`ClientError::Decode`] when the stream becomes undecodable.
    pub async fn fetch<C: RecordConsumer>(
        &self,
        options: FetchOptions,
        consumer: &mut C,
        sink: &dyn ErrorSink,
    ) -> Result<StreamSummary, ClientError> {
        let mut request = self.http.get(&options.url);
        if let Some(range) = &options.range {
            let value = range.header_value();
            if !value.is_empty() {
                request = request.header(PDTP_HEADER, value);
            }
        }

        let response = tokio::select! {
            () = options.cancel.cancelled() => {
                tracing::debug!(url = %options.url, "fetch cancelled before response");
                return Ok(StreamSummary {
                    delivered: 0,
                    recovered: 0,
                    outcome: StreamOutcome::Cancelled,
                });
            }
            response = request.send() => response?.error_for_status()?,
        };

        tracing::debug!(url = %options.url, status = %response.status(), "streaming response body");

        let body = response.bytes_stream().map_err(std::io::Error::other);
        let reader = StreamReader::new(body);

        let decode_opts = DecodeOptions {
            strict_truncation: options.strict_truncation,
            cancel: options.cancel.clone(),
            ..DecodeOptions::default()
        };
        let stream = RecordStream::with_options(reader, decode_opts);

        drain_stream(stream, consumer, sink).await
    }
}

/// The dispatch loop, separated from HTTP so any `AsyncRead` drives it.
async fn drain_stream<R, C>(
    mut stream: RecordStream<R>,
    consumer: &mut C,
    sink: &dyn ErrorSink,
) -> Result<StreamSummary, ClientError>
where
    R: AsyncRead + Unpin,
    C: RecordConsumer,
{
    let mut summary = StreamSummary {
        delivered: 0,
        recovered: 0,
        outcome: StreamOutcome::Completed,
    };

    while let Some(item) = stream.next().await {
        match item {
            Ok(payload) => {
                consumer.deliver(payload);
                summary.delivered += 1;
            }
            Err(err) if err.is_record_scoped() => {
                sink.report(&err);
                summary.recovered += 1;
            }
            Err(DecodeError::Cancelled) => {
                summary.outcome = StreamOutcome::Cancelled;
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    tracing::debug!(
        delivered = summary.delivered,
        recovered = summary.recovered,
        outcome = ?summary.outcome,
        "record stream drained"
    );
    Ok(summary)
}
