// Domain models - Core types and data structures

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Fixed frame rate for every frame/time conversion in this domain
pub const FRAME_RATE: u64 = 24;

/// Inclusive frame range with `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FrameInterval {
    pub start: u64,
    pub end: u64,
}

impl FrameInterval {
    /// Create a new interval, rejecting `start > end`
    pub fn new(start: u64, end: u64) -> Result<Self, DomainError> {
        if start > end {
            return Err(DomainError::InvalidRange(format!(
                "start ({}) is after end ({})",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Interval covering a single frame
    pub fn single(frame: u64) -> Self {
        Self {
            start: frame,
            end: frame,
        }
    }

    pub fn is_single(&self) -> bool {
        self.start == self.end
    }

    /// Frame halfway through the interval, rounded down
    pub fn middle_frame(&self) -> u64 {
        self.start + (self.end - self.start) / 2
    }
}

impl fmt::Display for FrameInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Upper frame bound derived from a probed video duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoBound {
    pub total_frames: u64,
}

impl VideoBound {
    pub fn new(total_frames: u64) -> Self {
        Self { total_frames }
    }

    /// `floor(seconds * 24)`; negative, zero or non-finite durations give an empty bound
    pub fn from_duration(seconds: f64) -> Self {
        if !seconds.is_finite() || seconds <= 0.0 {
            return Self { total_frames: 0 };
        }
        Self {
            total_frames: (seconds * FRAME_RATE as f64).floor() as u64,
        }
    }

    /// Both ends must lie at or below the total frame count
    pub fn admits(&self, start: u64, end: u64) -> bool {
        start <= self.total_frames && end <= self.total_frames
    }
}

/// One Baselight row: a file and its verbatim, comma-joined range descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameReference {
    pub filename: String,
    pub frames: String,
}

impl FrameReference {
    pub fn new(filename: impl Into<String>, frames: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            frames: frames.into(),
        }
    }
}

/// One Xytech row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub producer: String,
    pub operator: String,
    pub order_info: String,
}

impl OrderRecord {
    pub fn new(
        producer: impl Into<String>,
        operator: impl Into<String>,
        order_info: impl Into<String>,
    ) -> Self {
        Self {
            producer: producer.into(),
            operator: operator.into(),
            order_info: order_info.into(),
        }
    }
}

/// Join of an order record and a frame reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedRecord {
    pub producer: String,
    pub operator: String,
    pub order_info: String,
    pub filename: String,
    pub frames: String,
}

impl MatchedRecord {
    pub fn join(order: &OrderRecord, reference: &FrameReference) -> Self {
        Self {
            producer: order.producer.clone(),
            operator: order.operator.clone(),
            order_info: order.order_info.clone(),
            filename: reference.filename.clone(),
            frames: reference.frames.clone(),
        }
    }
}

/// A parsed range that was never confirmed as matched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnusedEntry {
    pub filename: String,
    pub frames: String,
}

/// Why an input line produced no record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Line is empty or whitespace only
    Blank,
    /// Line carries the error marker
    ErrorMarker,
    /// Baselight line without any range token
    TooFewTokens,
    /// Xytech line without the path separator
    MissingSeparator,
    /// Xytech line with fewer than two non-empty segments
    TooFewSegments,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::Blank => "blank line",
            SkipReason::ErrorMarker => "error marker present",
            SkipReason::TooFewTokens => "fewer than two tokens",
            SkipReason::MissingSeparator => "no path separator",
            SkipReason::TooFewSegments => "fewer than two path segments",
        };
        f.write_str(text)
    }
}

/// Result of parsing one input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome<T> {
    Parsed(T),
    Skipped(SkipReason),
}

/// Domain sentinels used while parsing exports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserOptions {
    pub error_marker: String,
    pub null_sentinel: String,
    pub path_separator: char,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            error_marker: "<err>".to_string(),
            null_sentinel: "<null>".to_string(),
            path_separator: '/',
        }
    }
}
