//! Image payload reconstruction.
//!
//! An image record arrives as metadata plus up to two raw payloads, and
//! leaves as ready-to-render bytes. Which pipeline runs depends on the
//! metadata `ext` tag:
//!
//! ```text
//!   ext == "jpg", mask_length == 0
//!     └── passthrough: encoded JPEG delivered byte-for-byte
//!
//!   ext == "jpg", mask_length > 0
//!     └── inflate mask → decode JPEG to RGBA → overwrite alpha → PNG
//!
//!   ext != "jpg"
//!     └── inflate RGB stream → inflate mask → interleave RGBA → PNG
//! ```
//!
//! The two no-mask behaviors differ: a maskless JPEG skips
//! reconstruction entirely, while a maskless raw stream still runs the
//! full pipeline with alpha fixed at 255.

use std::io::Cursor;

use bytes::Bytes;
use image::ImageEncoder;
use image::codecs::png::PngEncoder;
use pdtp_types::{AssetKind, ImageAsset, ImageMetadata};
use zune_jpeg::JpegDecoder;
use zune_jpeg::zune_core::options::DecoderOptions;

use crate::inflate::{InflateError, inflate};

/// Decompressed size cap for one image's pixel or mask stream.
const MAX_PIXEL_STREAM: usize = 64 * 1024 * 1024;

/// Errors from image reconstruction. All of them spoil exactly one
/// record; the surrounding stream stays decodable.
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    /// Pixel or mask stream failed to inflate.
    #[error(transparent)]
    Inflate(#[from] InflateError),

    /// The embedded JPEG could not be decoded.
    #[error("jpeg decode failed: {0}")]
    JpegDecode(String),

    /// PNG encoding of the composited pixels failed.
    #[error("png encode failed: {0}")]
    PngEncode(String),

    /// The inflated mask does not cover the decoded JPEG pixel-for-pixel.
    #[error("mask of {mask_len} bytes does not cover a {width}x{height} jpeg")]
    MaskSizeMismatch {
        mask_len: usize,
        width: usize,
        height: usize,
    },

    /// The RGBA buffer does not fill the declared dimensions.
    #[error("rgba buffer of {byte_len} bytes does not fill {width}x{height}")]
    PixelBufferMismatch {
        byte_len: usize,
        width: u32,
        height: u32,
    },
}

/// Turn an image record's raw payloads into a deliverable asset.
///
/// `data` and `mask` are the two in-stream payloads exactly as pulled,
/// still compressed where the wire format compresses them.
///
/// # Errors
///
/// Any [`RasterError`]; the caller reports it and moves to the next
/// record.
pub fn reconstruct(
    meta: &ImageMetadata,
    data: Bytes,
    mask: &[u8],
) -> Result<ImageAsset, RasterError> {
    if meta.ext == "jpg" {
        reconstruct_jpeg(data, mask)
    } else {
        reconstruct_raw(meta, &data, mask)
    }
}

/// JPEG path: no mask means the encoded bytes ship untouched; with a
/// mask, decode, replace alpha, re-encode as PNG.
fn reconstruct_jpeg(data: Bytes, mask: &[u8]) -> Result<ImageAsset, RasterError> {
    if mask.is_empty() {
        return Ok(ImageAsset {
            kind: AssetKind::Jpeg,
            bytes: data,
        });
    }

    let alpha = inflate(mask, MAX_PIXEL_STREAM)?;
    let (width, height, mut rgba) = decode_jpeg_rgba(&data)?;

    if alpha.len() != width * height {
        return Err(RasterError::MaskSizeMismatch {
            mask_len: alpha.len(),
            width,
            height,
        });
    }

    for (pixel, a) in rgba.chunks_exact_mut(4).zip(&alpha) {
        pixel[3] = *a;
    }

    let png = encode_png(&rgba, to_u32(width), to_u32(height))?;
    Ok(ImageAsset {
        kind: AssetKind::Png,
        bytes: png.into(),
    })
}

/// Raw path: both payloads inflate, RGB triplets gain an alpha channel
/// from the mask. An empty mask means fully opaque; a short mask reads
/// as 0 past its end.
fn reconstruct_raw(
    meta: &ImageMetadata,
    data: &[u8],
    mask: &[u8],
) -> Result<ImageAsset, RasterError> {
    let rgb = inflate(data, MAX_PIXEL_STREAM)?;
    let alpha = inflate(mask, MAX_PIXEL_STREAM)?;

    let mut rgba = Vec::with_capacity(rgb.len() / 3 * 4);
    for (i, px) in rgb.chunks_exact(3).enumerate() {
        let a = if alpha.is_empty() {
            0xFF
        } else {
            alpha.get(i).copied().unwrap_or(0)
        };
        rgba.extend_from_slice(&[px[0], px[1], px[2], a]);
    }

    let (width, height) = meta.pixel_dimensions();
    let png = encode_png(&rgba, width, height)?;
    Ok(ImageAsset {
        kind: AssetKind::Png,
        bytes: png.into(),
    })
}

fn decode_jpeg_rgba(data: &[u8]) -> Result<(usize, usize, Vec<u8>), RasterError> {
    let options = DecoderOptions::default()
        .set_max_width(u16::MAX as usize)
        .set_max_height(u16::MAX as usize);
    let mut decoder = JpegDecoder::new_with_options(Cursor::new(data), options);

    decoder
        .decode_headers()
        .map_err(|e| RasterError::JpegDecode(format!("{e:?}")))?;
    let info = decoder
        .info()
        .ok_or_else(|| RasterError::JpegDecode("headers decoded but no image info".to_owned()))?;
    let width = info.width as usize;
    let height = info.height as usize;

    let decoded = decoder
        .decode()
        .map_err(|e| RasterError::JpegDecode(format!("{e:?}")))?;

    let pixels = width * height;
    if pixels == 0 {
        return Err(RasterError::JpegDecode("zero-area jpeg".to_owned()));
    }

    // Output colorspace follows the source sampling: grayscale, RGB or
    // four-channel. Normalize to RGBA so the mask has somewhere to land.
    let rgba = match decoded.len() / pixels {
        1 => decoded.iter().flat_map(|&l| [l, l, l, 0xFF]).collect(),
        3 => decoded
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], 0xFF])
            .collect(),
        4 => decoded,
        n => {
            return Err(RasterError::JpegDecode(format!(
                "unsupported channel count {n}"
            )));
        }
    };

    Ok((width, height, rgba))
}

fn encode_png(rgba: &[u8], width: u32, height: u32) -> Result<Vec<u8>, RasterError> {
    let expected = (width as usize) * (height as usize) * 4;
    if rgba.len() != expected {
        return Err(RasterError::PixelBufferMismatch {
            byte_len: rgba.len(),
            width,
            height,
        });
    }

    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(rgba, width, height, image::ExtendedColorType::Rgba8)
        .map_err(|e| RasterError::PngEncode(e.to_string()))?;
    Ok(out)
}

#[allow(clippy::cast_possible_truncation)]
fn to_u32(n: usize) -> u32 {
    n as u32
}
