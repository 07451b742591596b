//! framerecon library
//!
//! Frame-range reconciliation between Baselight exports and Xytech work
//! orders: parsing, bounds validation, positional matching, unused-range
//! reporting and ffmpeg-backed thumbnail extraction.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod error;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use domain::errors::DomainError;
pub use domain::model::{
    FrameInterval, FrameReference, MatchedRecord, OrderRecord, ParserOptions, UnusedEntry,
    VideoBound, FRAME_RATE,
};
pub use domain::usecases::{ReconcileOutcome, ReconcileUseCase};
pub use error::{ReconError, ReconResult};
