// Domain use cases - Pure reconciliation pipeline

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::model::*;
use crate::domain::rules::*;

/// Per-reason counts of skipped input lines
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    pub baselight_records: usize,
    pub baselight_skipped: usize,
    pub xytech_records: usize,
    pub xytech_skipped: usize,
    pub skipped_by_reason: Vec<(SkipReason, usize)>,
}

impl ParseStats {
    fn from_parsed(
        baselight: &ParsedLines<FrameReference>,
        xytech: &ParsedLines<OrderRecord>,
    ) -> Self {
        let mut counts: HashMap<SkipReason, usize> = HashMap::new();
        for (_, reason) in baselight.skipped.iter().chain(xytech.skipped.iter()) {
            *counts.entry(*reason).or_default() += 1;
        }
        let mut skipped_by_reason: Vec<(SkipReason, usize)> = counts.into_iter().collect();
        skipped_by_reason.sort();

        Self {
            baselight_records: baselight.records.len(),
            baselight_skipped: baselight.skipped.len(),
            xytech_records: xytech.records.len(),
            xytech_skipped: xytech.skipped.len(),
            skipped_by_reason,
        }
    }
}

/// Valid frames of one file in compact notation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileCoverage {
    pub filename: String,
    pub frames: String,
}

/// Everything one reconciliation pass derives from its inputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileOutcome {
    pub strategy: String,
    pub stats: ParseStats,
    pub references: Vec<FrameReference>,
    pub orders: Vec<OrderRecord>,
    pub validation: ValidationReport,
    pub matched: Vec<MatchedRecord>,
    pub unused: Vec<UnusedEntry>,
    pub coverage: Vec<FileCoverage>,
}

/// Parse, validate, match and reconcile in one pass
pub struct ReconcileUseCase<'a> {
    parser: RangeTokenParser,
    strategy: &'a dyn MatchStrategy,
}

impl<'a> ReconcileUseCase<'a> {
    pub fn new(options: ParserOptions, strategy: &'a dyn MatchStrategy) -> Self {
        Self {
            parser: RangeTokenParser::new(options),
            strategy,
        }
    }

    /// Run the pipeline over raw export lines and a probed duration in seconds
    pub fn run<S: AsRef<str>>(
        &self,
        baselight_lines: &[S],
        xytech_lines: &[S],
        duration_seconds: f64,
    ) -> ReconcileOutcome {
        let baselight = self.parser.parse_baselight(baselight_lines);
        let xytech = self.parser.parse_xytech(xytech_lines);
        let stats = ParseStats::from_parsed(&baselight, &xytech);

        let references = self.parser.clean(baselight.records);
        let orders = self.parser.clean(xytech.records);
        info!(
            references = references.len(),
            orders = orders.len(),
            skipped = stats.baselight_skipped + stats.xytech_skipped,
            "Parsed input sources"
        );

        let validator = RangeValidator::from_duration(duration_seconds);
        let validation = validator.validate_references(&references);
        info!(
            total_frames = validation.total_frames,
            valid = validation.valid.len(),
            invalid = validation.invalid.len(),
            "Validated frame ranges"
        );

        let matched = self
            .strategy
            .pair(&validation.valid_references(), &orders);
        debug!(strategy = self.strategy.name(), matched = matched.len(), "Matched records");

        let unused = reconcile_per_file(&flatten_ranges(&references), &matched);
        let coverage = coverage_by_file(&validation.valid);

        ReconcileOutcome {
            strategy: self.strategy.name().to_string(),
            stats,
            references,
            orders,
            validation,
            matched,
            unused,
            coverage,
        }
    }
}

/// Merge the valid intervals of each file, files in order of first appearance
fn coverage_by_file(valid: &[ValidRange]) -> Vec<FileCoverage> {
    let mut order: Vec<&str> = Vec::new();
    let mut by_file: HashMap<&str, Vec<FrameInterval>> = HashMap::new();
    for range in valid {
        let intervals = by_file.entry(range.filename.as_str()).or_insert_with(|| {
            order.push(range.filename.as_str());
            Vec::new()
        });
        intervals.push(range.interval);
    }

    order
        .into_iter()
        .map(|filename| FileCoverage {
            filename: filename.to_string(),
            frames: format_intervals(by_file.get(filename).map(Vec::as_slice).unwrap_or(&[])),
        })
        .collect()
}
