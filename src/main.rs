//! Synthetic Fraud Transaction Generator - Main Entry Point
//!
//! Generates a CSV dataset of synthetic transactions in bounded batches.

use anyhow::{Context, Result};
use clap::Parser;
use fraud_data_generator::config::{AppConfig, LoggingConfig};
use fraud_data_generator::writer::stream;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fraud-data-generator")]
#[command(about = "Generate synthetic fraud transaction data", version)]
struct Cli {
    /// Output CSV filename
    #[arg(long)]
    filename: Option<String>,

    /// Directory to save the file
    #[arg(long)]
    output_dir: Option<String>,

    /// Total number of records to generate
    #[arg(long, allow_negative_numbers = true)]
    total_records: Option<i64>,

    /// Number of records per chunk
    #[arg(long, allow_negative_numbers = true)]
    chunk_size: Option<i64>,

    /// Seed for the random stream
    #[arg(long)]
    seed: Option<u64>,

    /// End of the timestamp window, RFC 3339 (defaults to now)
    #[arg(long)]
    anchor: Option<String>,

    /// Configuration file (TOML); defaults to config/config.toml when present
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from_path(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => AppConfig::load()?,
    };
    apply_overrides(&mut config, cli);

    init_logging(&config.logging)?;

    let plan = config.generator.plan()?;
    info!(
        destination = %plan.destination.display(),
        total_records = plan.total_records,
        chunk_size = plan.chunk_size,
        seed = plan.seed,
        anchor = %plan.anchor.to_rfc3339(),
        "Generating {} records in chunks of {}",
        plan.total_records,
        plan.chunk_size
    );

    let mut rng = ChaCha8Rng::seed_from_u64(plan.seed);
    let summary = stream(
        &mut rng,
        plan.anchor,
        &plan.destination,
        plan.total_records,
        plan.chunk_size,
    )?;

    let absolute = std::path::absolute(&summary.path).unwrap_or_else(|_| summary.path.clone());
    info!(
        records = summary.records,
        batches = summary.batches,
        fraud_labels = summary.fraud_labels,
        "CSV saved to {}",
        absolute.display()
    );

    Ok(())
}

fn apply_overrides(config: &mut AppConfig, cli: Cli) {
    let generator = &mut config.generator;
    if let Some(filename) = cli.filename {
        generator.filename = filename;
    }
    if let Some(output_dir) = cli.output_dir {
        generator.output_dir = output_dir;
    }
    if let Some(total_records) = cli.total_records {
        generator.total_records = total_records;
    }
    if let Some(chunk_size) = cli.chunk_size {
        generator.chunk_size = chunk_size;
    }
    if let Some(seed) = cli.seed {
        generator.seed = seed;
    }
    if cli.anchor.is_some() {
        generator.anchor = cli.anchor;
    }
}

fn init_logging(logging: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("fraud_data_generator={}", logging.level).parse()?);

    if logging.format == "json" {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
    Ok(())
}
