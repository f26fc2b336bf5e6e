//! Info command - decode replays and print a summary of each
//!
//! Files are decoded in parallel; summaries are printed in argument order
//! once the whole batch has finished, so output never interleaves.

use anyhow::{Context, Result};
use clap::Args;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

use osrkit::Replay;

/// Arguments for the info command
#[derive(Args)]
pub struct InfoArgs {
    /// Replay files to inspect (.osr)
    #[arg(required = true)]
    pub replays: Vec<PathBuf>,

    /// Also dump every action record, one `w|x|y|z` line each
    #[arg(long)]
    pub actions: bool,
}

/// Execute the info command
pub fn execute(args: InfoArgs) -> Result<()> {
    let decoded: Vec<Result<Replay>> = args
        .replays
        .par_iter()
        .map(|path| {
            let bytes = std::fs::read(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Replay::decode(&bytes)
                .with_context(|| format!("failed to decode {}", path.display()))
        })
        .collect();

    let mut failures = 0usize;
    for (path, result) in args.replays.iter().zip(decoded) {
        match result {
            Ok(replay) => print_summary(path, &replay, args.actions),
            Err(err) => {
                failures += 1;
                tracing::error!("{:#}", err);
            }
        }
    }

    if failures > 0 {
        anyhow::bail!(
            "{failures} of {} replay(s) failed to decode",
            args.replays.len()
        );
    }
    Ok(())
}

fn print_summary(path: &Path, replay: &Replay, actions: bool) {
    let header = &replay.header;
    let perfect = if header.perfect { ", perfect" } else { "" };

    println!("=== {} ===", path.display());
    println!("  Mode:       {} (client v{})", header.mode, header.version);
    println!("  Player:     {}", or_dash(&header.player_name));
    println!("  Beatmap:    {}", or_dash(&header.beatmap_hash));
    println!("  Replay:     {}", or_dash(&header.replay_hash));
    println!(
        "  Judgments:  {}x300 {}x100 {}x50 {} geki {} katu {} miss",
        header.count_300,
        header.count_100,
        header.count_50,
        header.count_geki,
        header.count_katu,
        header.count_miss
    );
    println!(
        "  Score:      {} ({}x max combo{})",
        header.score, header.max_combo, perfect
    );
    println!("  Mods:       {}", header.mods);
    println!("  Life graph: {} entries", header.life_graph.len());
    println!("  Timestamp:  {} ticks", header.timestamp);
    println!("  Actions:    {}", replay.actions.len());
    if let Some(seed) = replay.rng_seed() {
        println!("  RNG seed:   {seed}");
    }
    println!("  Score id:   {}", replay.score_id);

    if let Some((declared, actual)) = replay.declared_len_mismatch() {
        tracing::warn!(
            "{}: header declares a {} byte action block, file holds {}",
            path.display(),
            declared,
            actual
        );
    }

    if actions {
        for record in &replay.actions {
            println!(
                "{}|{}|{}|{}",
                record.delta_ms,
                record.x,
                record.y,
                record.keys.bits()
            );
        }
    }
}

fn or_dash(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}
