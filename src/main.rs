//! framerecon - Baselight / Xytech frame reconciliation
//!
//! Reads a Baselight frame-range export and a Xytech work-order export,
//! validates every range against the video length, pairs files with orders
//! and reports matched and unused ranges.
//!
//! # Usage
//!
//! ```bash
//! framerecon reconcile --baselight Baselight_export.txt --xytech Xytech.txt \
//!     --video twitch_nft_demo.mp4 --output-report matched.csv --output-csv unused.csv
//! framerecon validate --baselight Baselight_export.txt --duration 10
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::info;

use framerecon::cli::{commands, Cli, Commands};
use framerecon::config_initialization::{initialize_configuration, ConfigOverrides};
use framerecon::utils::logging::init_logging;

/// Main entry point for the framerecon CLI application
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut overrides = ConfigOverrides {
        log_level: cli.log_level.clone(),
        log_format: cli.log_format.clone(),
        ..ConfigOverrides::default()
    };
    if let Commands::Reconcile(args) = &cli.command {
        overrides.jobs = args.jobs;
        overrides.thumbnail_dir = args.thumbnail_dir.clone();
    }

    let config = initialize_configuration(cli.config.as_deref(), &overrides)?;
    init_logging(&config.logging);

    info!("Starting framerecon");

    match cli.command {
        Commands::Reconcile(args) => {
            info!("Executing reconcile command");
            commands::reconcile(args, &config).await?;
        }
        Commands::Validate(args) => {
            info!("Executing validate command");
            commands::validate(args, &config).await?;
        }
    }

    info!("framerecon completed successfully");
    Ok(())
}
