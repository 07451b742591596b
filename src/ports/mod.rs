// Ports - Interface definitions (contracts)

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::utils::time;

/// Port for reading exports and preparing output locations
#[async_trait]
pub trait FsPort: Send + Sync {
    /// Check if file exists
    async fn file_exists(&self, path: &Path) -> Result<bool, DomainError>;

    /// Read a text file as lines
    async fn read_lines(&self, path: &Path) -> Result<Vec<String>, DomainError>;

    /// Create directory (including parent directories)
    async fn create_directory(&self, path: &Path) -> Result<(), DomainError>;
}

/// Port for media duration probing
#[async_trait]
pub trait ProbePort: Send + Sync {
    /// Duration of the video in seconds.
    ///
    /// Returns `0.0` when the tool runs but reports no usable duration.
    async fn probe_duration(&self, video: &Path) -> Result<f64, DomainError>;
}

/// Port for still and clip extraction
#[async_trait]
pub trait ExtractPort: Send + Sync {
    /// Write a thumbnail of the interval's middle frame into `output_dir`
    async fn extract_thumbnail(
        &self,
        video: &Path,
        interval: FrameInterval,
        output_dir: &Path,
    ) -> Result<PathBuf, DomainError>;

    /// Render the interval as a standalone shot into `output_dir`
    async fn render_clip(
        &self,
        video: &Path,
        interval: FrameInterval,
        output_dir: &Path,
    ) -> Result<PathBuf, DomainError>;
}

/// Port for report serialization
#[async_trait]
pub trait ExportPort: Send + Sync {
    /// Write the matched report; format follows the file extension
    async fn write_matched(&self, rows: &[MatchedRow], path: &Path) -> Result<(), DomainError>;

    /// Write the unused ranges as CSV
    async fn write_unused(&self, entries: &[UnusedEntry], path: &Path) -> Result<(), DomainError>;
}

/// Matched record as handed to the report exporter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedRow {
    pub producer: String,
    pub operator: String,
    pub order_info: String,
    pub filename: String,
    pub frames: String,
    pub timestamp: Option<String>,
    pub timecode: Option<String>,
    pub thumbnail: Option<PathBuf>,
    pub clip: Option<PathBuf>,
}

impl MatchedRow {
    /// Row without media references; timing columns are filled when the range parses
    pub fn from_record(record: &MatchedRecord) -> Self {
        let interval = single_interval(&record.frames);
        Self {
            producer: record.producer.clone(),
            operator: record.operator.clone(),
            order_info: record.order_info.clone(),
            filename: record.filename.clone(),
            frames: record.frames.clone(),
            timestamp: interval.map(|i| time::format_seconds(time::frame_to_seconds(i.middle_frame()))),
            timecode: interval.map(|i| time::interval_to_timecode(&i)),
            thumbnail: None,
            clip: None,
        }
    }
}

/// The interval named by a range text holding exactly one range
pub fn single_interval(frames: &str) -> Option<FrameInterval> {
    match crate::domain::rules::parse_descriptor(frames).ok()?.as_slice() {
        [(start, end)] => FrameInterval::new(*start, *end).ok(),
        _ => None,
    }
}
