//! Command implementations

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use crate::adapters::AppConfig;
use crate::app::container::{AppContainer, DefaultAppContainer};
use crate::app::reconcile_interactor::ReconcileRequest;
use crate::app::validate_interactor::{DurationSource, ValidateRequest, ValidateResponse};
use crate::cli::args::{ReconcileArgs, ValidateArgs};
use crate::domain::rules::{InvalidEntry, ValidRange};
use crate::domain::usecases::ParseStats;

/// Execute the reconcile command
pub async fn reconcile(args: ReconcileArgs, config: &AppConfig) -> Result<()> {
    info!("Starting reconcile operation");

    let container = DefaultAppContainer::new(config).context("Failed to initialize services")?;

    let mut request = ReconcileRequest::new(args.baselight, args.xytech, args.video);
    request.output_report = Some(args.output_report.clone());
    request.output_csv = Some(args.output_csv.clone());
    request.thumbnails = !args.no_thumbnails;
    request.render_clips = args.render_clips;

    let response = container
        .reconcile_interactor()
        .execute(request)
        .await
        .context("Reconciliation failed")?;

    if response.media_failures > 0 {
        warn!(failures = response.media_failures, "Some media extractions failed");
    }

    let outcome = &response.outcome;
    println!("Video duration: {:.2} sec", response.duration_seconds);
    print_stats(&outcome.stats);
    println!("Valid ranges:   {}", outcome.validation.valid.len());
    println!("Invalid ranges: {}", outcome.validation.invalid.len());
    println!(
        "Matched:        {} ({} strategy)",
        outcome.matched.len(),
        outcome.strategy
    );
    println!("Unused:         {}", outcome.unused.len());
    println!("Report:         {}", args.output_report.display());
    println!("Unused CSV:     {}", args.output_csv.display());

    info!("Reconcile operation completed successfully");
    Ok(())
}

#[derive(Serialize)]
struct ValidateSummary<'a> {
    duration_seconds: f64,
    total_frames: u64,
    stats: &'a ParseStats,
    valid: &'a [ValidRange],
    invalid: &'a [InvalidEntry],
}

/// Execute the validate command
pub async fn validate(args: ValidateArgs, config: &AppConfig) -> Result<()> {
    info!("Starting validate operation");

    let duration = match (args.video, args.duration) {
        (Some(video), _) => DurationSource::Video(video),
        (None, Some(seconds)) => DurationSource::Seconds(seconds),
        (None, None) => anyhow::bail!("Either --video or --duration is required"),
    };

    let container = DefaultAppContainer::new(config).context("Failed to initialize services")?;
    let response = container
        .validate_interactor()
        .execute(ValidateRequest {
            baselight: args.baselight,
            duration,
        })
        .await
        .context("Validation failed")?;

    if args.json {
        let summary = ValidateSummary {
            duration_seconds: response.duration_seconds,
            total_frames: response.outcome.validation.total_frames,
            stats: &response.outcome.stats,
            valid: &response.outcome.validation.valid,
            invalid: &response.outcome.validation.invalid,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_validation(&response);
    }

    info!("Validate operation completed successfully");
    Ok(())
}

fn print_stats(stats: &ParseStats) {
    println!(
        "Baselight:      {} records, {} skipped",
        stats.baselight_records, stats.baselight_skipped
    );
    println!(
        "Xytech:         {} records, {} skipped",
        stats.xytech_records, stats.xytech_skipped
    );
}

fn print_validation(response: &ValidateResponse) {
    let validation = &response.outcome.validation;
    println!(
        "Video: {:.2} sec, {} frames",
        response.duration_seconds, validation.total_frames
    );
    print_stats(&response.outcome.stats);

    println!("\nValid ranges ({}):", validation.valid.len());
    for range in &validation.valid {
        println!("  {}  {}", range.filename, range.interval);
    }

    println!("\nInvalid ranges ({}):", validation.invalid.len());
    for entry in &validation.invalid {
        println!("  {}  {}  ({})", entry.filename, entry.text, entry.reason);
    }
}
