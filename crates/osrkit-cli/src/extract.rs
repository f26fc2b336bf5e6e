//! Extract command - write each replay's action block as a raw .lzma file
//!
//! The default path copies the stored block byte for byte without ever
//! inflating it. `--recompress` decodes and re-encodes the action stream
//! instead, which normalizes blocks written by other encoders.

use anyhow::{Context, Result};
use clap::Args;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Arguments for the extract command
#[derive(Args)]
pub struct ExtractArgs {
    /// Replay files to extract (.osr)
    #[arg(required = true)]
    pub replays: Vec<PathBuf>,

    /// Directory for the .lzma files (defaults to each replay's directory)
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Decode and re-encode the action stream instead of copying the
    /// stored block
    #[arg(long)]
    pub recompress: bool,
}

/// Execute the extract command
pub fn execute(args: ExtractArgs) -> Result<()> {
    if let Some(dir) = &args.out_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }

    // Extract in parallel; each success logs its own timing line.
    let results: Vec<Result<PathBuf>> = args
        .replays
        .par_iter()
        .map(|path| extract_one(path, args.out_dir.as_deref(), args.recompress))
        .collect();

    let mut failures = 0usize;
    for result in results {
        if let Err(err) = result {
            failures += 1;
            tracing::error!("{:#}", err);
        }
    }

    if failures > 0 {
        anyhow::bail!(
            "{failures} of {} replay(s) failed to extract",
            args.replays.len()
        );
    }
    Ok(())
}

fn extract_one(path: &Path, out_dir: Option<&Path>, recompress: bool) -> Result<PathBuf> {
    let started = std::time::Instant::now();
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;

    let block = if recompress {
        let replay = osrkit::Replay::decode(&bytes)
            .with_context(|| format!("failed to decode {}", path.display()))?;
        replay
            .recompress()
            .with_context(|| format!("failed to re-encode {}", path.display()))?
    } else {
        let (_, block) = osrkit::headerless(&bytes)
            .with_context(|| format!("failed to decode {}", path.display()))?;
        block.to_vec()
    };

    let out_path = output_path(path, out_dir)?;
    std::fs::write(&out_path, &block)
        .with_context(|| format!("failed to write {}", out_path.display()))?;

    tracing::info!(
        "{} -> {} ({} bytes in {:.1?})",
        path.display(),
        out_path.display(),
        block.len(),
        started.elapsed()
    );
    Ok(out_path)
}

fn output_path(path: &Path, out_dir: Option<&Path>) -> Result<PathBuf> {
    let name = path
        .file_name()
        .with_context(|| format!("{} has no file name", path.display()))?;
    let target = match out_dir {
        Some(dir) => dir.join(name),
        None => path.to_path_buf(),
    };
    Ok(target.with_extension("lzma"))
}
