//! CLI module for framerecon
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

pub use args::{ReconcileArgs, ValidateArgs};

/// Baselight / Xytech frame reconciliation
///
/// Matches Baselight frame-range exports against Xytech work orders, validates
/// every range against the video length and reports what was never used.
#[derive(Parser, Debug)]
#[command(name = "framerecon")]
#[command(about = "Reconcile Baselight frame ranges against Xytech work orders")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log output format (pretty, compact, json)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Configuration file (default: framerecon.toml or config/framerecon.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Match, validate and export a full reconciliation run
    Reconcile(args::ReconcileArgs),
    /// Classify Baselight ranges against a video length
    Validate(args::ValidateArgs),
}
