//! `pdtp fetch`: stream a document over HTTP and decode it live.
//!
//! Records are printed one per line as they are dispatched. With
//! `--assets-dir` every reconstructed image and embedded font is also
//! written to disk, named after the page and arrival order.
//!
//! Ctrl-C cancels the stream; everything dispatched up to that point is
//! kept and the summary reports the cancelled outcome.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use pdtp_client::{FetchOptions, LogSink, PageRange, PdtpClient, StreamOutcome};
use pdtp_types::ChunkPayload;
use tokio_util::sync::CancellationToken;

use crate::FetchArgs;

pub async fn run(args: &FetchArgs) -> Result<()> {
    if let Some(dir) = &args.assets_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating assets directory {}", dir.display()))?;
    }

    let mut options = FetchOptions::new(&args.url);
    options.strict_truncation = args.strict;
    if args.base.is_some() || args.start.is_some() || args.end.is_some() {
        options.range = Some(PageRange {
            base: args.base,
            start: args.start,
            end: args.end,
        });
    }

    let cancel = CancellationToken::new();
    options.cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    let client = PdtpClient::new().context("building HTTP client")?;
    let mut consumer = FetchConsumer {
        quiet: args.quiet,
        assets_dir: args.assets_dir.clone(),
        image_seq: 0,
        write_failures: 0,
    };

    let summary = client
        .fetch(options, &mut consumer, &LogSink)
        .await
        .with_context(|| format!("streaming {}", args.url))?;

    match summary.outcome {
        StreamOutcome::Completed => {
            println!(
                "done: {} records delivered, {} skipped",
                summary.delivered, summary.recovered
            );
        }
        StreamOutcome::Cancelled => {
            println!(
                "cancelled: {} records delivered, {} skipped",
                summary.delivered, summary.recovered
            );
        }
    }
    if consumer.write_failures > 0 {
        eprintln!("warning: {} asset(s) could not be written", consumer.write_failures);
    }
    Ok(())
}

struct FetchConsumer {
    quiet: bool,
    assets_dir: Option<PathBuf>,
    image_seq: usize,
    write_failures: usize,
}

impl FetchConsumer {
    fn save(&mut self, name: &str, bytes: &[u8]) {
        let Some(dir) = &self.assets_dir else { return };
        let path = dir.join(name);
        if let Err(e) = fs::write(&path, bytes) {
            tracing::warn!(path = %path.display(), error = %e, "asset write failed");
            self.write_failures += 1;
        }
    }
}

impl pdtp_client::RecordConsumer for FetchConsumer {
    fn deliver(&mut self, payload: ChunkPayload) {
        if !self.quiet {
            println!("{}", describe(&payload));
        }
        match payload {
            ChunkPayload::Image { meta, asset } => {
                self.image_seq += 1;
                let name = format!(
                    "p{}-img{}.{}",
                    meta.page,
                    self.image_seq,
                    asset.kind.extension()
                );
                self.save(&name, &asset.bytes);
            }
            ChunkPayload::Font { meta, bytes } => {
                let name = format!("font{}.ttf", meta.font_id);
                self.save(&name, &bytes);
            }
            _ => {}
        }
    }
}

fn describe(payload: &ChunkPayload) -> String {
    match payload {
        ChunkPayload::Page(meta) => {
            format!("page  {}: {}x{}", meta.page, meta.width, meta.height)
        }
        ChunkPayload::Text(meta) => {
            format!(
                "text  p{} ({:.1},{:.1}) {} {}pt: {:?}",
                meta.page,
                meta.x,
                meta.y,
                meta.font,
                meta.font_size,
                snippet(&meta.text)
            )
        }
        ChunkPayload::Image { meta, asset } => {
            let (w, h) = meta.pixel_dimensions();
            format!(
                "image p{} {}x{} -> {} ({} bytes)",
                meta.page,
                w,
                h,
                asset.kind.extension(),
                asset.bytes.len()
            )
        }
        ChunkPayload::Font { meta, bytes } => {
            format!("font  #{} ({} bytes)", meta.font_id, bytes.len())
        }
        ChunkPayload::Path(meta) => {
            format!("path  p{} fill={}", meta.page, meta.fill_color)
        }
    }
}

fn snippet(text: &str) -> String {
    const MAX: usize = 40;
    if text.chars().count() <= MAX {
        text.to_owned()
    } else {
        let head: String = text.chars().take(MAX).collect();
        format!("{head}…")
    }
}
