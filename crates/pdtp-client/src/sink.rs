use pdtp_decoder::DecodeError;
use pdtp_types::ChunkPayload;

/// Receives decoded payloads one at a time, in stream order.
///
/// Dispatch is synchronous and atomic per record: `deliver` returns
/// before the next frame is parsed, so a consumer never observes
/// out-of-order or partially reconstructed content.
pub trait RecordConsumer {
    fn deliver(&mut self, payload: ChunkPayload);
}

/// Closures work directly as consumers.
impl<F: FnMut(ChunkPayload)> RecordConsumer for F {
    fn deliver(&mut self, payload: ChunkPayload) {
        self(payload);
    }
}

/// Receives record-scoped decode failures the stream recovered from.
///
/// One call per spoiled record. The stream has already moved on when
/// `report` runs; the sink only decides what to do with the diagnosis.
pub trait ErrorSink {
    fn report(&self, err: &DecodeError);
}

/// Default sink: structured warning per skipped record.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl ErrorSink for LogSink {
    fn report(&self, err: &DecodeError) {
        tracing::warn!(error = %err, "skipping undecodable record");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdtp_types::PageMetadata;

    #[test]
    fn closures_are_consumers() {
        let mut pages = Vec::new();
        {
            let mut consumer = |payload: ChunkPayload| {
                if let ChunkPayload::Page(meta) = payload {
                    pages.push(meta.page);
                }
            };
            consumer.deliver(ChunkPayload::Page(PageMetadata {
                width: 1.0,
                height: 1.0,
                page: 9,
            }));
        }
        assert_eq!(pages, [9]);
    }

    #[test]
    fn log_sink_reports_without_panicking() {
        LogSink.report(&DecodeError::UnknownRecordType { type_id: 0x99 });
    }
}
