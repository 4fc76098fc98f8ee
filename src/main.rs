//! Extra Attacks - timing report
//!
//! Loads the configuration tables and clip durations, then prints the
//! resolved timing profile and cost for every weapon type and attack mode.

use clap::Parser;
use extra_attacks::clips::{ClipRecord, ClipRegistry};
use extra_attacks::core::config::EngineConfig;
use extra_attacks::core::error::Result;
use extra_attacks::overrides::{MemoryController, MemoryHost};
use extra_attacks::rules::{parse_clip_file, DirectoryConfigSource};
use extra_attacks::timing::{BaselineProvider, TimingProfile, TimingSource};
use extra_attacks::ExtraAttackEngine;
use serde::Serialize;
use std::path::PathBuf;

/// Print resolved extra-attack timings and costs
#[derive(Parser, Debug)]
#[command(name = "extra-attacks")]
#[command(about = "Resolve extra-attack timing and cost for every weapon type and mode")]
struct Args {
    /// Directory holding timing.toml, costs.toml and replacements.toml
    #[arg(long, default_value = "config")]
    config_dir: PathBuf,

    /// TOML file listing replacement clips (`[[clip]] name, duration`)
    #[arg(long)]
    clips: Option<PathBuf>,

    /// Output format: text or json
    #[arg(long, default_value = "text")]
    format: String,
}

#[derive(Serialize)]
struct ReportRow {
    key: String,
    replacement_clip: Option<String>,
    source: String,
    stamina_cost: f32,
    eitr_cost: f32,
    cooldown_seconds: f32,
    timing: TimingProfile,
}

fn source_name(source: TimingSource) -> &'static str {
    match source {
        TimingSource::Individual => "individual",
        TimingSource::WeaponType => "weapon_type",
        TimingSource::Computed => "computed",
        TimingSource::Fallback => "fallback",
    }
}

fn load_clips(path: Option<&PathBuf>) -> Result<Vec<ClipRecord>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let content = std::fs::read_to_string(path)?;
    parse_clip_file(&content, &path.display().to_string())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("extra_attacks=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = EngineConfig::with_config_dir(args.config_dir.clone());
    if let Err(e) = config.validate() {
        tracing::warn!("Invalid engine config: {}", e);
    }

    let clips = load_clips(args.clips.as_ref()).unwrap_or_else(|e| {
        tracing::warn!("Failed to load clips: {}. Continuing without replacement clips", e);
        Vec::new()
    });

    let source = DirectoryConfigSource::new(&config);
    let base = MemoryController::from_baseline("Player", &BaselineProvider::builtin());
    let engine = ExtraAttackEngine::new(
        config,
        source,
        MemoryHost::new(),
        base,
        ClipRegistry::from_records(clips),
    );
    engine.initialize();

    let rows: Vec<ReportRow> = engine
        .timing()
        .resolve_all()
        .into_iter()
        .map(|(key, resolved)| {
            let cost = engine.costs().cost(key.weapon_type, key.mode);
            ReportRow {
                key: key.canonical(),
                replacement_clip: engine.replacements().get(key),
                source: source_name(resolved.source).to_string(),
                stamina_cost: cost.stamina_cost,
                eitr_cost: cost.eitr_cost,
                cooldown_seconds: cost.cooldown_seconds,
                timing: resolved.profile,
            }
        })
        .collect();

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!(
        "{:<24} {:<22} {:<12} {:>6} {:>6} {:>6} {:>6} {:>6} {:>7} {:>5}",
        "key", "clip", "source", "len", "hit", "trail+", "trail-", "chain", "stamina", "cd"
    );
    for row in &rows {
        let t = &row.timing;
        println!(
            "{:<24} {:<22} {:<12} {:>6.2} {:>6.2} {:>6.2} {:>6.2} {:>6.2} {:>7.1} {:>5.1}",
            row.key,
            row.replacement_clip.as_deref().unwrap_or("-"),
            row.source,
            t.clip_length,
            t.hit_timing,
            t.trail_on_timing,
            t.trail_off_timing,
            t.chain_timing,
            row.stamina_cost,
            row.cooldown_seconds,
        );
    }

    Ok(())
}
