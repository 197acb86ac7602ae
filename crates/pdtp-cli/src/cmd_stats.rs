//! `pdtp stats`: aggregate a captured stream file.
//!
//! Example output:
//!
//! ```text
//! file:    capture.pdtp (12842 bytes)
//! records: 37 (1 skipped)
//!
//! kind    count   asset bytes
//! page        3             0
//! text       24             0
//! image       6         48211
//! font        2         10882
//! path        2             0
//! ```
//!
//! Asset bytes are the reconstructed sizes (PNG/JPEG output, font blobs),
//! not the wire sizes. Decoding runs in strict mode so a stream that ends
//! mid-record is called out instead of silently dropped.

use std::fs;
use std::io::Cursor;

use anyhow::{Context, Result};
use pdtp_decoder::{DecodeError, DecodeOptions, RecordStream};
use pdtp_types::ChunkPayload;

use crate::StatsArgs;

#[derive(Default)]
struct Tally {
    pages: usize,
    texts: usize,
    images: usize,
    image_bytes: usize,
    fonts: usize,
    font_bytes: usize,
    paths: usize,
    skipped: usize,
}

impl Tally {
    fn add(&mut self, payload: &ChunkPayload) {
        match payload {
            ChunkPayload::Page(_) => self.pages += 1,
            ChunkPayload::Text(_) => self.texts += 1,
            ChunkPayload::Image { asset, .. } => {
                self.images += 1;
                self.image_bytes += asset.bytes.len();
            }
            ChunkPayload::Font { bytes, .. } => {
                self.fonts += 1;
                self.font_bytes += bytes.len();
            }
            ChunkPayload::Path(_) => self.paths += 1,
        }
    }

    fn total(&self) -> usize {
        self.pages + self.texts + self.images + self.fonts + self.paths
    }
}

pub async fn run(args: &StatsArgs) -> Result<()> {
    let bytes = fs::read(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;
    let file_len = bytes.len();

    let opts = DecodeOptions {
        strict_truncation: true,
        ..DecodeOptions::default()
    };
    let mut stream = RecordStream::with_options(Cursor::new(bytes), opts);

    let mut tally = Tally::default();
    let mut truncation: Option<String> = None;
    while let Some(item) = stream.next().await {
        match item {
            Ok(payload) => tally.add(&payload),
            Err(e) if e.is_record_scoped() => tally.skipped += 1,
            Err(e @ DecodeError::TransportEnded { .. }) => truncation = Some(e.to_string()),
            Err(e) => return Err(e).context("decoding stream"),
        }
    }

    println!("file:    {} ({file_len} bytes)", args.file.display());
    println!("records: {} ({} skipped)", tally.total(), tally.skipped);
    println!();
    println!("kind    count   asset bytes");
    println!("page  {:>7}  {:>12}", tally.pages, 0);
    println!("text  {:>7}  {:>12}", tally.texts, 0);
    println!("image {:>7}  {:>12}", tally.images, tally.image_bytes);
    println!("font  {:>7}  {:>12}", tally.fonts, tally.font_bytes);
    println!("path  {:>7}  {:>12}", tally.paths, 0);

    if let Some(note) = truncation {
        println!();
        println!("note: {note}");
    }
    Ok(())
}
