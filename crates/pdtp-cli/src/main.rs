//! `pdtp` command-line tool.
//!
//! ```text
//! ┌─────────┬────────────────────────────────────────────────────────────┐
//! │ Command │ What it does                                               │
//! ├─────────┼────────────────────────────────────────────────────────────┤
//! │ fetch   │ Stream a document from a server, printing records as they │
//! │         │ arrive and optionally saving image/font assets to disk.   │
//! │ inspect │ Decode a captured stream from a file and list every       │
//! │         │ record in order.                                          │
//! │ stats   │ Aggregate per-kind record counts and payload sizes for a  │
//! │         │ captured stream.                                          │
//! └─────────┴────────────────────────────────────────────────────────────┘
//! ```
//!
//! All commands exit 0 on success and 1 on a fatal error. Malformed or
//! unknown records inside an otherwise healthy stream are reported but do
//! not fail the command.

mod cmd_fetch;
mod cmd_inspect;
mod cmd_stats;

use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pdtp", version, about = "Paginated document stream client and decoder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug-level diagnostics on stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Stream a document over HTTP and decode it live.
    Fetch(FetchArgs),
    /// List the records in a captured stream file.
    Inspect(InspectArgs),
    /// Summarise record counts and payload sizes in a captured stream file.
    Stats(StatsArgs),
}

/// Arguments for `pdtp fetch`.
///
/// ```text
/// ┌──────────────┬──────────────────────────────────────────────────────┐
/// │ Flag         │ Meaning                                              │
/// ├──────────────┼──────────────────────────────────────────────────────┤
/// │ URL          │ Endpoint that serves the stream.                     │
/// │ --base       │ First page of the document window.                   │
/// │ --start      │ First page to request.                               │
/// │ --end        │ Last page to request (inclusive).                    │
/// │ --assets-dir │ Write reconstructed images and fonts here.           │
/// │ --strict     │ Treat a stream that ends mid-record as an error.     │
/// │ --quiet      │ Suppress the per-record lines, print the summary.    │
/// └──────────────┴──────────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct FetchArgs {
    /// Endpoint URL.
    pub url: String,

    /// Base page for the request window.
    #[arg(long)]
    pub base: Option<u32>,

    /// First page to request.
    #[arg(long)]
    pub start: Option<u32>,

    /// Last page to request (inclusive).
    #[arg(long)]
    pub end: Option<u32>,

    /// Directory to write image and font assets into.
    #[arg(long, value_name = "DIR")]
    pub assets_dir: Option<std::path::PathBuf>,

    /// Fail if the stream ends in the middle of a record.
    #[arg(long)]
    pub strict: bool,

    /// Only print the final summary.
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for `pdtp inspect`.
#[derive(clap::Args)]
pub struct InspectArgs {
    /// Captured stream file.
    pub file: std::path::PathBuf,

    /// Print each record's metadata as JSON instead of a one-line summary.
    #[arg(long)]
    pub show_json: bool,

    /// Stop after this many records.
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,
}

/// Arguments for `pdtp stats`.
#[derive(clap::Args)]
pub struct StatsArgs {
    /// Captured stream file.
    pub file: std::path::PathBuf,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    }

    let result = match cli.command {
        Commands::Fetch(args) => cmd_fetch::run(&args).await,
        Commands::Inspect(args) => cmd_inspect::run(&args).await,
        Commands::Stats(args) => cmd_stats::run(&args).await,
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
