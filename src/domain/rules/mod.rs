// Domain rules - Frame range parsing, validation, formatting, matching and reconciliation

pub mod range_formatter;
pub mod range_parser;
pub mod range_validator;
pub mod reconciler;
pub mod record_matcher;

pub use range_formatter::{expand, format_frames, format_intervals, merge_intervals, parse_frames};
pub use range_parser::{
    canonical_range, parse_descriptor, Clean, ParsedLines, RangeParseError, RangeTokenParser,
};
pub use range_validator::{
    validate, Classification, InvalidEntry, InvalidRange, InvalidReason, RangeValidator,
    ValidRange, ValidationReport,
};
pub use reconciler::{flatten_ranges, reconcile, reconcile_per_file};
pub use record_matcher::{match_records, MatchStrategy, PositionalMatch};

#[cfg(test)]
mod tests;
