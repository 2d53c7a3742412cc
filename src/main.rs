//! nmfmix CLI entry point.

use std::fs::File;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use nmfmix::cli::Args;
use nmfmix::encode::FfmpegEncoder;

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Set up logging
    let filter = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into());

    if let Some(path) = &args.log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file: {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Arc::new(file))
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let encoder = FfmpegEncoder::with_binary(&args.ffmpeg);

    let summary = nmfmix::run_batch(&args.source, &args.output, &encoder)
        .with_context(|| format!("Failed to process {}", args.source.display()))?;

    println!(
        "Converted {} file(s), {} failed",
        summary.converted, summary.failed
    );

    Ok(())
}
