use tokio_util::sync::CancellationToken;

/// Name of the request header carrying the page range.
pub const PDTP_HEADER: &str = "PDTP";

/// Page window sent to the server as the `PDTP` request header.
///
/// Serialized as a semicolon-terminated `key=value` list, e.g.
/// `base=1;start=1;end=10;`. Fields left `None` are omitted and the
/// server falls back to its defaults (whole document from page one).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PageRange {
    /// Page the viewer is centered on; servers stream outward from it.
    pub base: Option<u32>,
    /// First page of the window, one-based inclusive.
    pub start: Option<u32>,
    /// Last page of the window, one-based inclusive.
    pub end: Option<u32>,
}

impl PageRange {
    /// A `start..=end` window.
    #[must_use]
    pub fn pages(start: u32, end: u32) -> Self {
        Self {
            base: None,
            start: Some(start),
            end: Some(end),
        }
    }

    /// Render the header value. Empty when no field is set.
    #[must_use]
    pub fn header_value(&self) -> String {
        let mut value = String::new();
        for (key, field) in [("base", self.base), ("start", self.start), ("end", self.end)] {
            if let Some(n) = field {
                value.push_str(key);
                value.push('=');
                value.push_str(&n.to_string());
                value.push(';');
            }
        }
        value
    }
}

/// Everything a single [`fetch`](crate::PdtpClient::fetch) needs.
#[derive(Clone, Debug)]
pub struct FetchOptions {
    /// Document URL.
    pub url: String,
    /// Optional page window; `None` streams the whole document.
    pub range: Option<PageRange>,
    /// Surface mid-record truncation as an error instead of a silent
    /// end of stream.
    pub strict_truncation: bool,
    /// Cancels the fetch: the in-flight read is dropped and the
    /// summary comes back with a `Cancelled` outcome.
    pub cancel: CancellationToken,
}

impl FetchOptions {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            range: None,
            strict_truncation: false,
            cancel: CancellationToken::new(),
        }
    }
}
