/// Semantic record type identifiers.
///
/// Each variant maps to the wire byte value mirrored by the
/// `pdtp_wire::record_type` constants. Unknown values are captured by
/// `Unknown(u8)`: a newer server may emit record types this version
/// doesn't recognize, and the decoder skips them without losing framing.
///
/// ```text
/// ┌──────┬─────────┬──────────────────────────────┬──────────────────┐
/// │ Wire │ Variant │ Metadata body                │ Raw payload      │
/// ├──────┼─────────┼──────────────────────────────┼──────────────────┤
/// │ 0x00 │ Page    │ page geometry                │ -                │
/// │ 0x01 │ Text    │ positioned text run          │ -                │
/// │ 0x02 │ Image   │ raster placement + lengths   │ data + mask      │
/// │ 0x03 │ Font    │ font id + length             │ font bytes       │
/// │ 0x04 │ Path    │ vector path + colors         │ -                │
/// │ 0xFF │ Error   │ reserved, not processed      │ -                │
/// └──────┴─────────┴──────────────────────────────┴──────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordKind {
    Page,
    Text,
    Image,
    Font,
    Path,
    /// Reserved by the protocol for server-side error reports. Carried
    /// in the table for completeness; the decoder skips it.
    Error,
    /// Catch-all for record types this version doesn't recognize. The
    /// raw wire byte is preserved for diagnostics.
    Unknown(u8),
}

impl RecordKind {
    /// Return the single-byte wire ID for this record kind.
    #[must_use]
    pub fn wire_id(&self) -> u8 {
        match self {
            Self::Page => 0x00,
            Self::Text => 0x01,
            Self::Image => 0x02,
            Self::Font => 0x03,
            Self::Path => 0x04,
            Self::Error => 0xFF,
            Self::Unknown(id) => *id,
        }
    }

    /// Parse a wire byte into a [`RecordKind`].
    ///
    /// Known values map to their named variant. Anything else becomes
    /// `Unknown(id)`, preserving the raw value.
    #[must_use]
    pub fn from_wire_id(id: u8) -> Self {
        match id {
            0x00 => Self::Page,
            0x01 => Self::Text,
            0x02 => Self::Image,
            0x03 => Self::Font,
            0x04 => Self::Path,
            0xFF => Self::Error,
            other => Self::Unknown(other),
        }
    }

    /// Lower-case name used in log lines and CLI tables.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Text => "text",
            Self::Image => "image",
            Self::Font => "font",
            Self::Path => "path",
            Self::Error => "error",
            Self::Unknown(_) => "unknown",
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown(id) => write!(f, "unknown({id:#04X})"),
            other => f.write_str(other.name()),
        }
    }
}
