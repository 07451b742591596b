//! Bounds checking of range descriptors against a video's frame count

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::model::*;
use crate::domain::rules::range_parser::{canonical_range, parse_descriptor, RangeParseError};

/// Why a range was classified as invalid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InvalidReason {
    /// The descriptor could not be read as numbers
    Unparseable { error: RangeParseError },
    /// `start > end`
    Reversed,
    /// One of the ends lies past the video's last frame
    OutOfBounds { total_frames: u64 },
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidReason::Unparseable { error } => write!(f, "unparseable: {}", error),
            InvalidReason::Reversed => write!(f, "start is after end"),
            InvalidReason::OutOfBounds { total_frames } => {
                write!(f, "exceeds video length of {} frames", total_frames)
            }
        }
    }
}

/// A range, as written, that failed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidRange {
    pub text: String,
    pub reason: InvalidReason,
}

/// Outcome of validating a single descriptor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub valid: Vec<FrameInterval>,
    pub invalid: Vec<InvalidRange>,
}

impl Classification {
    /// True when every range parsed and lies inside the bound
    pub fn is_valid(&self) -> bool {
        self.invalid.is_empty() && !self.valid.is_empty()
    }
}

/// A valid interval still attached to its file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidRange {
    pub filename: String,
    pub interval: FrameInterval,
}

/// An invalid range still attached to its file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidEntry {
    pub filename: String,
    pub text: String,
    pub reason: InvalidReason,
}

/// Partition of a batch of frame references
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub total_frames: u64,
    pub valid: Vec<ValidRange>,
    pub invalid: Vec<InvalidEntry>,
}

impl ValidationReport {
    /// Valid ranges as single-range references, ready for matching
    pub fn valid_references(&self) -> Vec<FrameReference> {
        self.valid
            .iter()
            .map(|range| FrameReference::new(range.filename.clone(), range.interval.to_string()))
            .collect()
    }
}

/// Classifies range descriptors against a [`VideoBound`]
#[derive(Debug, Clone, Copy)]
pub struct RangeValidator {
    bound: VideoBound,
}

impl RangeValidator {
    pub fn new(bound: VideoBound) -> Self {
        Self { bound }
    }

    /// Bound from a probed duration in seconds at the fixed frame rate
    pub fn from_duration(seconds: f64) -> Self {
        Self::new(VideoBound::from_duration(seconds))
    }

    pub fn bound(&self) -> VideoBound {
        self.bound
    }

    /// Classify every range of a descriptor.
    ///
    /// A descriptor that fails to parse is reported as a single invalid item
    /// carrying the whole text.
    pub fn validate(&self, descriptor: &str) -> Classification {
        let pairs = match parse_descriptor(descriptor) {
            Ok(pairs) => pairs,
            Err(error) => {
                warn!(frames = descriptor, %error, "Skipping invalid frame range");
                return Classification {
                    valid: Vec::new(),
                    invalid: vec![InvalidRange {
                        text: descriptor.to_string(),
                        reason: InvalidReason::Unparseable { error },
                    }],
                };
            }
        };

        let mut classification = Classification::default();
        for (start, end) in pairs {
            match FrameInterval::new(start, end) {
                Ok(interval) if self.bound.admits(start, end) => {
                    classification.valid.push(interval)
                }
                Ok(_) => classification.invalid.push(InvalidRange {
                    text: canonical_range(start, end),
                    reason: InvalidReason::OutOfBounds {
                        total_frames: self.bound.total_frames,
                    },
                }),
                Err(_) => classification.invalid.push(InvalidRange {
                    text: format!("{}-{}", start, end),
                    reason: InvalidReason::Reversed,
                }),
            }
        }
        classification
    }

    /// Validate a batch of references, keeping the filename on every result
    pub fn validate_references(&self, references: &[FrameReference]) -> ValidationReport {
        let mut report = ValidationReport {
            total_frames: self.bound.total_frames,
            ..ValidationReport::default()
        };

        for reference in references {
            let classification = self.validate(&reference.frames);
            report
                .valid
                .extend(classification.valid.into_iter().map(|interval| ValidRange {
                    filename: reference.filename.clone(),
                    interval,
                }));
            report
                .invalid
                .extend(classification.invalid.into_iter().map(|range| InvalidEntry {
                    filename: reference.filename.clone(),
                    text: range.text,
                    reason: range.reason,
                }));
        }

        report
    }
}

/// Classify a descriptor against a raw frame count
pub fn validate(total_frames: u64, descriptor: &str) -> Classification {
    RangeValidator::new(VideoBound::new(total_frames)).validate(descriptor)
}
