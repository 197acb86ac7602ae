#![no_main]

use libfuzzer_sys::fuzz_target;
use pdtp_types::{FontMetadata, ImageMetadata, PageMetadata, PathMetadata, TextMetadata};

// Fuzz target: per-record metadata deserialization.
//
// Input format:
//   byte 0: selects which metadata type to parse
//   bytes 1..: JSON body
//
// Catches bugs in:
// - serde rejection of missing/mistyped fields
// - Number handling (negative and fractional byte lengths must error,
//   not wrap)
// - UTF-8 and escape handling in string fields
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let body = &data[1..];
    match data[0] % 5 {
        0 => {
            let _ = PageMetadata::from_json_body(body);
        }
        1 => {
            let _ = TextMetadata::from_json_body(body);
        }
        2 => {
            if let Ok(meta) = ImageMetadata::from_json_body(body) {
                // Declared payload lengths drive stream reads; they must
                // come out as plain usizes, never panic.
                let _ = meta.length.checked_add(meta.mask_length);
                let _ = meta.pixel_dimensions();
            }
        }
        3 => {
            let _ = FontMetadata::from_json_body(body);
        }
        _ => {
            let _ = PathMetadata::from_json_body(body);
        }
    }
});
