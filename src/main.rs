//! CLI entry point for the Figma component exporter.

use anyhow::{Context, Result};
use clap::Parser;
use figma_export::{ExportConfig, FigmaClient, run_export};
use tracing::{debug, info};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");

    // Build the configuration before touching the network: missing
    // credentials or a URL without a file key fail right here.
    let mut config = ExportConfig::from_env()?;
    config.apply_overrides(&args.overrides)?;

    let client = FigmaClient::with_base_url(&config.token, &config.api_base);

    let summary = run_export(&client, &config)
        .await
        .context("error exporting components from Figma")?;

    info!(
        components = summary.components,
        with_image = summary.with_image,
        downloaded = summary.downloaded,
        skipped = summary.skipped,
        failed = summary.failed,
        manifest = %summary.manifest_path.display(),
        "export complete"
    );

    Ok(())
}
