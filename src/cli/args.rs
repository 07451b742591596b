//! Command-line argument definitions

use std::path::PathBuf;

use clap::{ArgGroup, Args};

fn parse_jobs(s: &str) -> Result<usize, String> {
    clap_num::number_range(s, 1, 256)
}

/// Arguments for the reconcile command
#[derive(Args, Debug)]
pub struct ReconcileArgs {
    /// Baselight export (filename and frame ranges per line)
    #[arg(long)]
    pub baselight: PathBuf,

    /// Xytech work order export (producer/operator/order paths)
    #[arg(long)]
    pub xytech: PathBuf,

    /// Video the frame ranges refer to
    #[arg(long)]
    pub video: PathBuf,

    /// Matched report; .json and .yaml select those formats, anything else is CSV
    #[arg(long)]
    pub output_report: PathBuf,

    /// CSV file for ranges that were never used
    #[arg(long)]
    pub output_csv: PathBuf,

    /// Skip thumbnail extraction
    #[arg(long)]
    pub no_thumbnails: bool,

    /// Render every matched range as a standalone shot
    #[arg(long)]
    pub render_clips: bool,

    /// Maximum concurrent ffmpeg extractions (1-256)
    #[arg(long, value_parser = parse_jobs)]
    pub jobs: Option<usize>,

    /// Directory for extracted thumbnails
    #[arg(long)]
    pub thumbnail_dir: Option<PathBuf>,
}

/// Arguments for the validate command
#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("length")
        .required(true)
        .args(["video", "duration"]),
))]
pub struct ValidateArgs {
    /// Baselight export to classify
    #[arg(long)]
    pub baselight: PathBuf,

    /// Probe this video for its length
    #[arg(long)]
    pub video: Option<PathBuf>,

    /// Video length in seconds
    #[arg(long)]
    pub duration: Option<f64>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}
