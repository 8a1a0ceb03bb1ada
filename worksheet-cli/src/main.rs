//! Command-line interface for worksheet-core
//!
//! Converts a raster image into a paint-by-numbers worksheet session document.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use worksheet_core::{process, SessionDocument, WorksheetConfig, WorksheetError};

#[derive(Parser)]
#[command(name = "worksheet-cli")]
#[command(about = "Generate paint-by-numbers worksheets from raster images")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Process an image into a worksheet session document
    Process {
        /// Input image file
        #[arg(short, long)]
        input: PathBuf,

        /// Output session JSON file
        #[arg(short, long)]
        output: PathBuf,

        /// Target palette size for k-means quantization
        #[arg(long, default_value = "48")]
        max_colors: u32,

        /// Maximum k-means iterations
        #[arg(long, default_value = "10")]
        max_iterations: u32,

        /// Floor for dynamicMinSize region merging
        #[arg(long, default_value = "20")]
        min_region_size_floor: u32,

        /// Divisor for dynamicMinSize region merging
        #[arg(long, default_value = "40000")]
        min_region_size_divisor: u32,

        /// Seed for deterministic k-means runs (omit for nondeterministic runs)
        #[arg(long)]
        seed: Option<u64>,

        /// Artist name recorded in the session document
        #[arg(long, default_value = "artist")]
        artist_name: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let exit_code = match &cli.command {
        Commands::Process { .. } => run_process(&cli.command),
    };

    std::process::exit(exit_code);
}

fn run_process(command: &Commands) -> i32 {
    match process_command(command) {
        Ok(()) => 0,
        Err(err) => {
            log::error!("{err:#}");
            let is_worksheet_error = err.chain().any(|cause| cause.downcast_ref::<WorksheetError>().is_some());
            if is_worksheet_error {
                1
            } else {
                2
            }
        }
    }
}

fn process_command(command: &Commands) -> Result<()> {
    let Commands::Process {
        input,
        output,
        max_colors,
        max_iterations,
        min_region_size_floor,
        min_region_size_divisor,
        seed,
        artist_name,
    } = command;

    log::info!("Loading image: {}", input.display());
    let img = image::open(input)
        .with_context(|| format!("failed to open image: {}", input.display()))?
        .to_rgba8();
    let (width, height) = img.dimensions();

    let config = WorksheetConfig {
        max_colors: *max_colors,
        max_kmeans_iterations: *max_iterations,
        min_region_size_floor: *min_region_size_floor,
        min_region_size_divisor: *min_region_size_divisor,
        rng_seed: *seed,
        ..WorksheetConfig::default()
    };

    log::info!("Processing {}x{} image with config: {:?}", width, height, config);
    let start_time = Instant::now();

    let processed = process(img.as_raw(), width, height, &config)
        .with_context(|| "worksheet processing failed")?;

    let elapsed = start_time.elapsed();
    log::info!(
        "Processing completed in {:.2}s: {} colors, {} regions",
        elapsed.as_secs_f64(),
        processed.palette.len(),
        processed.regions.len()
    );

    let timestamp_ms = timestamp_from_filesystem(output)?;
    let document = SessionDocument::new(
        artist_name.clone(),
        timestamp_ms,
        input.display().to_string(),
        processed,
    );

    let json = serde_json::to_string_pretty(&document)
        .with_context(|| "failed to serialize session document")?;
    fs::write(output, json)
        .with_context(|| format!("failed to write session document to: {}", output.display()))?;

    log::info!("Session document saved to: {}", output.display());
    Ok(())
}

/// Millisecond timestamp derived from the filesystem clock, since the pipeline
/// itself never reads wall-clock time.
fn timestamp_from_filesystem(_output: &std::path::Path) -> Result<u64> {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .with_context(|| "system clock is before the Unix epoch")?;
    Ok(now.as_millis() as u64)
}
