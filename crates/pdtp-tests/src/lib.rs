//! Shared fixtures for the PDTP integration tests and benchmarks.
//!
//! The protocol ships no encoder; servers produce the byte stream. Tests
//! still need realistic streams, so [`StreamBuilder`] assembles them
//! record by record: frame headers, metadata JSON, and the trailing
//! zlib/JPEG payloads that image and font records carry.
//!
//! Panics on I/O are fine here. Everything writes into a `Vec<u8>` and a
//! broken fixture should abort the test loudly.

#![warn(clippy::pedantic)]
#![allow(clippy::missing_panics_doc, clippy::must_use_candidate)]

use std::io::{Cursor, Write};

use bytes::Bytes;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use pdtp_decoder::{DecodeError, DecodeOptions, RecordStream};
use pdtp_types::ChunkPayload;
use pdtp_wire::{Frame, record_type};
use serde_json::json;

/// Assembles a PDTP byte stream record by record.
///
/// ```
/// use pdtp_tests::StreamBuilder;
///
/// let bytes = StreamBuilder::new()
///     .page(1, 612.0, 792.0)
///     .text(1, "Hello")
///     .finish();
/// assert_eq!(bytes[0], 0x00);
/// ```
#[derive(Default)]
pub struct StreamBuilder {
    out: Vec<u8>,
}

impl StreamBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a frame with the given type and body bytes.
    pub fn raw_record(mut self, ty: u8, body: &[u8]) -> Self {
        let frame = Frame {
            record_type: ty,
            body: Bytes::copy_from_slice(body),
        };
        frame
            .write_to(&mut self.out)
            .expect("fixture frame body fits a u32 length");
        self
    }

    /// Append arbitrary bytes with no framing. For dangling-tail fixtures.
    pub fn raw_bytes(mut self, bytes: &[u8]) -> Self {
        self.out.extend_from_slice(bytes);
        self
    }

    /// Append a page record.
    pub fn page(self, page: u32, width: f64, height: f64) -> Self {
        let meta = json!({ "width": width, "height": height, "page": page });
        self.json_record(record_type::PAGE, &meta)
    }

    /// Append a text record with fixed placement.
    pub fn text(self, page: u32, text: &str) -> Self {
        let meta = json!({
            "text": text,
            "x": 72.0,
            "y": 96.0,
            "z": 1.0,
            "fontSize": 12.0,
            "font": "f1",
            "page": page,
        });
        self.json_record(record_type::TEXT, &meta)
    }

    /// Append a JPEG image record.
    ///
    /// `mask` is the raw alpha plane (one byte per pixel); it is
    /// zlib-compressed on the wire. `None` writes `maskLength: 0`, the
    /// passthrough case.
    pub fn image_jpg(mut self, page: u32, w: u32, h: u32, jpeg: &[u8], mask: Option<&[u8]>) -> Self {
        let packed_mask = mask.map(deflate).unwrap_or_default();
        let meta = image_meta(page, w, h, jpeg.len(), packed_mask.len(), "jpg");
        self = self.json_record(record_type::IMAGE, &meta);
        self.out.extend_from_slice(jpeg);
        self.out.extend_from_slice(&packed_mask);
        self
    }

    /// Append a raw-pixel image record (`ext: "png"`).
    ///
    /// `rgb` is the uncompressed interleaved pixel stream; both it and the
    /// optional mask are zlib-compressed on the wire.
    pub fn image_raw(mut self, page: u32, w: u32, h: u32, rgb: &[u8], mask: Option<&[u8]>) -> Self {
        let packed = deflate(rgb);
        let packed_mask = mask.map(deflate).unwrap_or_default();
        let meta = image_meta(page, w, h, packed.len(), packed_mask.len(), "png");
        self = self.json_record(record_type::IMAGE, &meta);
        self.out.extend_from_slice(&packed);
        self.out.extend_from_slice(&packed_mask);
        self
    }

    /// Append a font record carrying `bytes` verbatim.
    pub fn font(mut self, font_id: u32, bytes: &[u8]) -> Self {
        let meta = json!({ "fontId": font_id, "length": bytes.len() });
        self = self.json_record(record_type::FONT, &meta);
        self.out.extend_from_slice(bytes);
        self
    }

    /// Append a vector path record.
    pub fn path(self, page: u32, d: &str) -> Self {
        let meta = json!({
            "x": 0.0,
            "y": 0.0,
            "z": 0.0,
            "width": 100.0,
            "height": 100.0,
            "path": d,
            "fillColor": "#000000",
            "strokeColor": "none",
            "page": page,
        });
        self.json_record(record_type::PATH, &meta)
    }

    pub fn finish(self) -> Vec<u8> {
        self.out
    }

    fn json_record(self, ty: u8, meta: &serde_json::Value) -> Self {
        let body = serde_json::to_vec(meta).expect("fixture metadata serialises");
        self.raw_record(ty, &body)
    }
}

fn image_meta(
    page: u32,
    w: u32,
    h: u32,
    length: usize,
    mask_length: usize,
    ext: &str,
) -> serde_json::Value {
    json!({
        "x": 10.0,
        "y": 20.0,
        "z": 1.0,
        "width": f64::from(w),
        "height": f64::from(h),
        "dw": f64::from(w),
        "dh": f64::from(h),
        "length": length,
        "maskLength": mask_length,
        "page": page,
        "ext": ext,
        "clipPath": "",
    })
}

/// zlib-compress `data` the way a PDTP server does.
pub fn deflate(data: &[u8]) -> Vec<u8> {
    let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
    enc.write_all(data).expect("zlib encode");
    enc.finish().expect("zlib finish")
}

/// A width x height JPEG filled with one RGB colour.
pub fn solid_jpeg(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    let pixels: Vec<u8> = (0..width * height).flat_map(|_| rgb).collect();
    let img = image::RgbImage::from_raw(width, height, pixels).expect("pixel buffer size");
    let mut out = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, 100)
        .encode_image(&img)
        .expect("jpeg encode");
    out
}

/// Drive a full stream to completion, splitting delivered records from
/// recovered per-record errors. Panics on stream-fatal errors; tests that
/// expect those drive [`RecordStream`] directly.
pub async fn decode_all(bytes: Vec<u8>) -> (Vec<ChunkPayload>, Vec<DecodeError>) {
    decode_all_with(bytes, DecodeOptions::default()).await
}

/// [`decode_all`] with explicit options.
pub async fn decode_all_with(
    bytes: Vec<u8>,
    opts: DecodeOptions,
) -> (Vec<ChunkPayload>, Vec<DecodeError>) {
    let mut stream = RecordStream::with_options(Cursor::new(bytes), opts);
    let mut payloads = Vec::new();
    let mut errors = Vec::new();
    while let Some(item) = stream.next().await {
        match item {
            Ok(payload) => payloads.push(payload),
            Err(e) if e.is_record_scoped() => errors.push(e),
            Err(e) => panic!("stream-fatal decode error: {e}"),
        }
    }
    (payloads, errors)
}
