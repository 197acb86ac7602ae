use serde::{Deserialize, Serialize};

use crate::error::{TypeError, decode_metadata};

/// Image record metadata: raster placement plus the byte counts of the
/// raw payloads that follow the frame.
///
/// An image record is the one place framing depends on the metadata
/// body: after the JSON frame, `length` bytes of image data and then
/// `mask_length` bytes of compressed alpha mask follow as bare in-stream
/// bytes with no envelope of their own. A decoder that fails to parse
/// this body cannot know how many bytes to skip, so the payloads of a
/// malformed image record are unrecoverable.
///
/// Payload interpretation depends on `ext`:
///
/// - `"jpg"`: `length` bytes are an encoded JPEG. `mask_length == 0`
///   means no mask follows and the JPEG is passed through untouched;
///   otherwise the mask is DEFLATE-compressed alpha bytes, one per
///   pixel.
/// - anything else: `length` bytes are a DEFLATE-compressed stream of
///   RGB triplets, and the mask payload is always present (possibly
///   zero bytes).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMetadata {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Intrinsic raster width in pixels.
    pub width: f64,
    /// Intrinsic raster height in pixels.
    pub height: f64,
    /// Display width on the page.
    pub dw: f64,
    /// Display height on the page.
    pub dh: f64,
    /// Byte count of the image data payload following the frame.
    pub length: usize,
    /// Byte count of the compressed mask payload following the image
    /// data. Zero means "no mask" for `jpg` and "empty mask" otherwise.
    pub mask_length: usize,
    pub page: u32,
    /// Source encoding tag, e.g. `"jpg"` or `"raw"`.
    pub ext: String,
    /// SVG-style clip path applied at render time. Empty when unclipped.
    pub clip_path: String,
}

impl ImageMetadata {
    /// Decode from a frame's JSON body.
    ///
    /// # Errors
    ///
    /// [`TypeError::Metadata`] when the body is not valid JSON or a
    /// field is missing or mistyped. A fractional or negative `length`
    /// lands here too.
    pub fn from_json_body(body: &[u8]) -> Result<Self, TypeError> {
        decode_metadata("image", body)
    }

    /// Intrinsic pixel dimensions rounded to whole pixels.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn pixel_dimensions(&self) -> (u32, u32) {
        (self.width.round() as u32, self.height.round() as u32)
    }
}
