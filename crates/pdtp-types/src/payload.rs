use bytes::Bytes;

use crate::font::FontMetadata;
use crate::image::ImageMetadata;
use crate::kind::RecordKind;
use crate::page::PageMetadata;
use crate::path::PathMetadata;
use crate::text::TextMetadata;

/// Container format of a delivered image asset.
///
/// Reconstruction emits PNG; a `jpg` source with no mask skips
/// reconstruction entirely and is delivered as the original JPEG.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetKind {
    Jpeg,
    Png,
}

impl AssetKind {
    #[must_use]
    pub fn media_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }

    /// File extension without the dot, for writing assets to disk.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
        }
    }
}

/// Ready-to-render image bytes plus their container format.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageAsset {
    pub kind: AssetKind,
    pub bytes: Bytes,
}

/// One fully decoded record, ready for the consumer.
///
/// This is the outward-facing type: image payloads have already been
/// reconstructed, font bytes already extracted. Payloads are delivered
/// strictly in stream order.
#[derive(Clone, Debug, PartialEq)]
pub enum ChunkPayload {
    Page(PageMetadata),
    Text(TextMetadata),
    Image {
        meta: ImageMetadata,
        asset: ImageAsset,
    },
    Font {
        meta: FontMetadata,
        bytes: Bytes,
    },
    Path(PathMetadata),
}

impl ChunkPayload {
    #[must_use]
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::Page(_) => RecordKind::Page,
            Self::Text(_) => RecordKind::Text,
            Self::Image { .. } => RecordKind::Image,
            Self::Font { .. } => RecordKind::Font,
            Self::Path(_) => RecordKind::Path,
        }
    }

    /// Page number this payload belongs to. Fonts are document-wide and
    /// have none.
    #[must_use]
    pub fn page(&self) -> Option<u32> {
        match self {
            Self::Page(meta) => Some(meta.page),
            Self::Text(meta) => Some(meta.page),
            Self::Image { meta, .. } => Some(meta.page),
            Self::Path(meta) => Some(meta.page),
            Self::Font { .. } => None,
        }
    }
}
