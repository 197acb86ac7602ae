/// Errors from deserializing typed record metadata.
///
/// Higher-level than `pdtp_wire::WireError`: the frame envelope was
/// intact, but the JSON body inside it did not describe a valid record.
/// These are recoverable per record: the decoder reports them and moves
/// on to the next frame.
#[derive(Debug, thiserror::Error)]
pub enum TypeError {
    /// The JSON metadata body could not be deserialized.
    ///
    /// Covers invalid UTF-8, JSON syntax errors, missing required fields
    /// and wrong-typed values. The `record` name says which decoder was
    /// running; `source` carries serde's position and cause.
    #[error("malformed {record} metadata: {source}")]
    Metadata {
        record: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

pub(crate) fn decode_metadata<T: serde::de::DeserializeOwned>(
    record: &'static str,
    body: &[u8],
) -> Result<T, TypeError> {
    serde_json::from_slice(body).map_err(|source| TypeError::Metadata { record, source })
}
