#![warn(clippy::pedantic)]

pub mod error;
pub mod font;
pub mod image;
pub mod kind;
pub mod page;
pub mod path;
pub mod payload;
pub mod text;

pub use error::TypeError;
pub use font::FontMetadata;
pub use image::ImageMetadata;
pub use kind::RecordKind;
pub use page::PageMetadata;
pub use path::PathMetadata;
pub use payload::{AssetKind, ChunkPayload, ImageAsset};
pub use text::TextMetadata;
