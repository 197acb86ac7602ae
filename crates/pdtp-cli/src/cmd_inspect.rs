//! `pdtp inspect`: list every record in a captured stream file.
//!
//! Example output:
//!
//! ```text
//!    0  page   p1  612x792
//!    1  text   p1  "Hello world" (72.0,96.0) f1 12pt
//!    2  image  p1  2x2 -> png (96 bytes)
//!    3  font   --  #7 (1024 bytes)
//!    4  path   p1  fill #000000
//! skipped: 1 record could not be decoded
//! ```
//!
//! Records that fail to decode are listed in place and counted; the rest
//! of the stream is still shown.

use std::fs;
use std::io::Cursor;

use anyhow::{Context, Result};
use pdtp_decoder::RecordStream;
use pdtp_types::ChunkPayload;

use crate::InspectArgs;

pub async fn run(args: &InspectArgs) -> Result<()> {
    let bytes = fs::read(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;

    let mut stream = RecordStream::new(Cursor::new(bytes));
    let mut index = 0usize;
    let mut skipped = 0usize;

    loop {
        if args.limit.is_some_and(|n| index >= n) {
            break;
        }
        let Some(item) = stream.next().await else { break };
        match item {
            Ok(payload) => {
                if args.show_json {
                    println!("--- record {index} ({}) ---", payload.kind().name());
                    println!("{}", metadata_json(&payload)?);
                } else {
                    println!("{index:>4}  {}", line(&payload));
                }
            }
            Err(e) if e.is_record_scoped() => {
                skipped += 1;
                println!("{index:>4}  error  {e}");
            }
            Err(e) => return Err(e).context("decoding stream"),
        }
        index += 1;
    }

    if skipped > 0 {
        println!("skipped: {skipped} record(s) could not be decoded");
    }
    Ok(())
}

fn line(payload: &ChunkPayload) -> String {
    match payload {
        ChunkPayload::Page(meta) => {
            format!("page   p{}  {}x{}", meta.page, meta.width, meta.height)
        }
        ChunkPayload::Text(meta) => {
            format!(
                "text   p{}  {:?} ({:.1},{:.1}) {} {}pt",
                meta.page, meta.text, meta.x, meta.y, meta.font, meta.font_size
            )
        }
        ChunkPayload::Image { meta, asset } => {
            let (w, h) = meta.pixel_dimensions();
            format!(
                "image  p{}  {}x{} -> {} ({} bytes)",
                meta.page,
                w,
                h,
                asset.kind.extension(),
                asset.bytes.len()
            )
        }
        ChunkPayload::Font { meta, bytes } => {
            format!("font   --  #{} ({} bytes)", meta.font_id, bytes.len())
        }
        ChunkPayload::Path(meta) => {
            format!("path   p{}  fill {}", meta.page, meta.fill_color)
        }
    }
}

fn metadata_json(payload: &ChunkPayload) -> Result<String> {
    let json = match payload {
        ChunkPayload::Page(meta) => serde_json::to_string_pretty(meta),
        ChunkPayload::Text(meta) => serde_json::to_string_pretty(meta),
        ChunkPayload::Image { meta, .. } => serde_json::to_string_pretty(meta),
        ChunkPayload::Font { meta, .. } => serde_json::to_string_pretty(meta),
        ChunkPayload::Path(meta) => serde_json::to_string_pretty(meta),
    };
    json.context("serialising record metadata")
}
