//! osr - command-line tools for osu! replay (.osr) files
//!
//! # Commands
//!
//! - `osr info` - Decode replays and print a summary of each
//! - `osr extract` - Write each replay's action block as a raw `.lzma` file
//!
//! # Usage
//!
//! ```bash
//! # Inspect one replay
//! osr info play.osr
//!
//! # Inspect many; decoding runs in parallel
//! osr info replays/*.osr
//!
//! # Pull the headerless action blocks out of a batch
//! osr extract replays/*.osr --out-dir blocks/
//! ```
//!
//! Batch commands process every input even when some fail; failures are
//! logged and reflected in the exit status.

mod extract;
mod info;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Command-line tools for osu! replay (.osr) files
#[derive(Parser)]
#[command(name = "osr")]
#[command(about = "Inspect and extract osu! replay (.osr) files")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode replays and print a summary of each
    Info(info::InfoArgs),

    /// Write each replay's action block as a raw .lzma file
    Extract(extract::ExtractArgs),
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Info(args) => info::execute(args),
        Commands::Extract(args) => extract::execute(args),
    }
}
