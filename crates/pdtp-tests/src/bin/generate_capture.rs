//! Sample capture generator for the PDTP tooling.
//!
//! Writes a small two-page stream with every record kind to a file that
//! `pdtp inspect` and `pdtp stats` can read.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin generate_capture -p pdtp-tests -- capture.pdtp
//! ```

#![allow(clippy::pedantic)]

use pdtp_tests::{StreamBuilder, solid_jpeg};

fn main() {
    let path = std::env::args().nth(1).unwrap_or_else(|| "capture.pdtp".into());

    let jpeg = solid_jpeg(16, 16, [200, 40, 40]);
    let rgb: Vec<u8> = (0..16u32 * 16).flat_map(|_| [40u8, 200, 40]).collect();
    let mask = vec![0x80u8; 16 * 16];

    let bytes = StreamBuilder::new()
        .page(1, 612.0, 792.0)
        .text(1, "First page")
        .image_jpg(1, 16, 16, &jpeg, None)
        .font(7, b"\x00\x01\x00\x00 fake sfnt")
        .path(1, "M 0 0 L 100 0 L 100 100 Z")
        .page(2, 612.0, 792.0)
        .text(2, "Second page")
        .image_raw(2, 16, 16, &rgb, Some(&mask))
        .finish();

    std::fs::write(&path, &bytes).expect("write capture file");
    println!("wrote {} bytes to {path}", bytes.len());
}
