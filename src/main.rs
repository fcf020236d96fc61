//! Hearthdump CLI - Command-line tool for Hearthstone card media extraction.
//!
//! This is the main entry point for the Hearthdump command-line application.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::{Builder, Env};
use indicatif::{ProgressBar, ProgressStyle};

use hearthdump::prelude::*;

/// Hearthdump - Hearthstone card portrait and sound extraction tool
#[derive(Parser)]
#[command(name = "hearthdump")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract portraits and sounds of cards
    Extract {
        /// Hearthstone install folder (bundles live under Data/Win)
        #[arg(short, long, env = "HEARTHSTONE_ROOT")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, env = "HEARTHDUMP_OUTPUT")]
        output: PathBuf,

        /// Asset manifest JSON [default: <input>/asset_manifest.json]
        #[arg(short, long)]
        manifest: Option<PathBuf>,

        /// Gameplay audio text JSON, for voice line subtitles
        #[arg(short, long)]
        gameplay_audio: Option<PathBuf>,

        /// Card ids to extract (glob patterns); all cards when omitted
        cards: Vec<String>,

        /// Image options: normal, signature
        #[arg(long, value_delimiter = ',')]
        image: Vec<String>,

        /// Audio options: attack, death, lifetime, additional-play, trigger,
        /// sub-option, reset-game, sub-spell
        #[arg(long, value_delimiter = ',')]
        audio: Vec<String>,

        /// Locales to extract, in output order
        #[arg(short, long, value_delimiter = ',', default_value = "enus")]
        locale: Vec<String>,

        /// Compute records and paths without writing media files
        #[arg(long)]
        no_assets: bool,

        /// Also write image/struct.json and audio/struct.json per card
        #[arg(long)]
        sub_struct: bool,

        /// Write one struct.json for all cards instead of one per card
        #[arg(long)]
        merged_struct: bool,

        /// Escape non-ASCII characters in struct.json files
        #[arg(long)]
        ensure_ascii: bool,

        /// Number of cards extracted in parallel
        #[arg(short, long, default_value_t = 1)]
        jobs: usize,
    },

    /// List card ids in an asset manifest
    List {
        /// Asset manifest JSON
        #[arg(short, long)]
        manifest: PathBuf,

        /// Card id filters (glob patterns)
        cards: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    match cli.command {
        Commands::Extract {
            input,
            output,
            manifest,
            gameplay_audio,
            cards,
            image,
            audio,
            locale,
            no_assets,
            sub_struct,
            merged_struct,
            ensure_ascii,
            jobs,
        } => {
            let settings = ExtractSettings::new(&output)
                .with_image_options(&image)?
                .with_audio_options(&audio)?
                .with_locales(&locale)?
                .no_assets(no_assets)
                .sub_struct(sub_struct)
                .merged_struct(merged_struct)
                .ensure_ascii(ensure_ascii)
                .jobs(jobs);
            let manifest = manifest.unwrap_or_else(|| input.join("asset_manifest.json"));
            cmd_extract(&input, &manifest, gameplay_audio.as_deref(), &cards, settings)?;
        }
        Commands::List { manifest, cards } => {
            cmd_list(&manifest, &cards)?;
        }
    }

    Ok(())
}

fn cmd_extract(
    input: &Path,
    manifest_path: &Path,
    gameplay_audio: Option<&Path>,
    patterns: &[String],
    settings: ExtractSettings,
) -> Result<()> {
    let start = Instant::now();
    let manifest = AssetManifest::open(manifest_path).context("Failed to load asset manifest")?;
    let card_ids = select_cards(&manifest, patterns)?;

    log::info!(
        "Loaded manifest in {:?}: {} cards selected",
        start.elapsed(),
        card_ids.len()
    );

    let mut pipeline = ExtractionPipeline::new(settings, BundleStore::with_json_dumps(input), manifest);
    if let Some(path) = gameplay_audio {
        let table = GameplayAudio::open(path).context("Failed to load gameplay audio")?;
        pipeline = pipeline.with_gameplay_audio(table);
    }

    let pb = ProgressBar::new(card_ids.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let report = pipeline
        .run_with_progress(card_ids.as_slice(), |done, _| pb.set_position(done as u64))
        .context("Extraction failed")?;
    pb.finish_with_message("Done");

    println!(
        "Extracted {} cards in {:?} ({} skipped, {} failed, {} bundles opened)",
        report.succeeded,
        start.elapsed(),
        report.skipped,
        report.failed,
        pipeline.store().len()
    );

    if !report.is_complete() {
        anyhow::bail!("{} of {} cards failed", report.failed, report.total());
    }

    Ok(())
}

fn cmd_list(manifest_path: &Path, patterns: &[String]) -> Result<()> {
    let manifest = AssetManifest::open(manifest_path).context("Failed to load asset manifest")?;
    let card_ids = select_cards(&manifest, patterns)?;

    for card_id in &card_ids {
        println!("{card_id}");
    }
    println!("\nTotal: {} cards", card_ids.len());

    Ok(())
}

/// Card ids of the manifest matching any pattern, in pattern order.
///
/// A pattern without wildcards is taken as an exact id even when the manifest
/// does not define it, so the pipeline reports it as skipped.
fn select_cards(manifest: &AssetManifest, patterns: &[String]) -> Result<Vec<String>> {
    let all = manifest.card_ids();
    if patterns.is_empty() {
        return Ok(all.into_iter().map(str::to_string).collect());
    }

    let mut selected: Vec<String> = Vec::new();
    for pattern in patterns {
        let matcher = glob::Pattern::new(pattern).with_context(|| format!("Invalid card pattern: {pattern}"))?;
        let before = selected.len();
        for card_id in all.iter().filter(|id| matcher.matches(id)) {
            if !selected.iter().any(|s| s == card_id) {
                selected.push(card_id.to_string());
            }
        }
        if selected.len() == before && glob::Pattern::escape(pattern) == *pattern && !selected.contains(pattern) {
            selected.push(pattern.clone());
        }
    }
    Ok(selected)
}
