//! Line parsing for Baselight and Xytech exports, plus range descriptor parsing

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::model::*;

/// Records parsed from a batch of lines, with the skipped line numbers (1-based)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLines<T> {
    pub records: Vec<T>,
    pub skipped: Vec<(usize, SkipReason)>,
}

impl<T> Default for ParsedLines<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

impl<T> ParsedLines<T> {
    /// Number of lines skipped for the given reason
    pub fn skipped_for(&self, reason: SkipReason) -> usize {
        self.skipped.iter().filter(|(_, r)| *r == reason).count()
    }
}

/// Converts raw export lines into domain records
#[derive(Debug, Clone, Default)]
pub struct RangeTokenParser {
    options: ParserOptions,
}

impl RangeTokenParser {
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parse `<filename> <token> [<token> ...]`; tokens are kept verbatim and joined with ", "
    pub fn parse_baselight_line(&self, line: &str) -> LineOutcome<FrameReference> {
        if line.trim().is_empty() {
            return LineOutcome::Skipped(SkipReason::Blank);
        }
        if line.contains(self.options.error_marker.as_str()) {
            return LineOutcome::Skipped(SkipReason::ErrorMarker);
        }

        let mut tokens = line.split_whitespace();
        let filename = match tokens.next() {
            Some(name) => name,
            None => return LineOutcome::Skipped(SkipReason::Blank),
        };
        let ranges: Vec<&str> = tokens.collect();
        if ranges.is_empty() {
            return LineOutcome::Skipped(SkipReason::TooFewTokens);
        }

        LineOutcome::Parsed(FrameReference::new(filename, ranges.join(", ")))
    }

    /// Parse a path-like line: first segment is the producer, second the operator, last the order
    pub fn parse_xytech_line(&self, line: &str) -> LineOutcome<OrderRecord> {
        if line.trim().is_empty() {
            return LineOutcome::Skipped(SkipReason::Blank);
        }
        let separator = self.options.path_separator;
        if !line.contains(separator) {
            return LineOutcome::Skipped(SkipReason::MissingSeparator);
        }

        let segments: Vec<&str> = line
            .split(separator)
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .collect();

        match segments.as_slice() {
            [producer, operator, .., order_info] => {
                LineOutcome::Parsed(OrderRecord::new(*producer, *operator, *order_info))
            }
            [producer, operator] => {
                LineOutcome::Parsed(OrderRecord::new(*producer, *operator, *operator))
            }
            _ => LineOutcome::Skipped(SkipReason::TooFewSegments),
        }
    }

    pub fn parse_baselight<I, S>(&self, lines: I) -> ParsedLines<FrameReference>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        collect_lines(lines, |line| self.parse_baselight_line(line))
    }

    pub fn parse_xytech<I, S>(&self, lines: I) -> ParsedLines<OrderRecord>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        collect_lines(lines, |line| self.parse_xytech_line(line))
    }

    /// Strip the null sentinel and surrounding whitespace from every field
    pub fn clean<T: Clean>(&self, records: Vec<T>) -> Vec<T> {
        records
            .into_iter()
            .map(|record| record.clean(&self.options.null_sentinel))
            .collect()
    }
}

fn collect_lines<I, S, T, F>(lines: I, parse: F) -> ParsedLines<T>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    F: Fn(&str) -> LineOutcome<T>,
{
    let mut parsed = ParsedLines::default();
    for (index, line) in lines.into_iter().enumerate() {
        match parse(line.as_ref()) {
            LineOutcome::Parsed(record) => parsed.records.push(record),
            LineOutcome::Skipped(reason) => {
                tracing::debug!(line = index + 1, %reason, "Skipping input line");
                parsed.skipped.push((index + 1, reason));
            }
        }
    }
    parsed
}

/// Records whose textual fields can be cleaned of the null sentinel
pub trait Clean: Sized {
    fn clean(self, null_sentinel: &str) -> Self;
}

fn clean_field(field: &str, null_sentinel: &str) -> String {
    if null_sentinel.is_empty() {
        return field.trim().to_string();
    }
    field.replace(null_sentinel, "").trim().to_string()
}

/// Clean each comma part of a descriptor, dropping parts left empty
fn clean_descriptor(frames: &str, null_sentinel: &str) -> String {
    frames
        .split(',')
        .map(|part| clean_field(part, null_sentinel))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

impl Clean for FrameReference {
    fn clean(self, null_sentinel: &str) -> Self {
        Self {
            filename: clean_field(&self.filename, null_sentinel),
            frames: clean_descriptor(&self.frames, null_sentinel),
        }
    }
}

impl Clean for OrderRecord {
    fn clean(self, null_sentinel: &str) -> Self {
        Self {
            producer: clean_field(&self.producer, null_sentinel),
            operator: clean_field(&self.operator, null_sentinel),
            order_info: clean_field(&self.order_info, null_sentinel),
        }
    }
}

/// Why a range descriptor could not be read as numbers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RangeParseError {
    /// Descriptor has no content
    Empty,
    /// A comma-separated part is blank
    EmptyPart,
    /// A part contains something other than digits
    NotANumber { part: String },
    /// A part has a dangling or repeated `-`
    MalformedSeparator { part: String },
}

impl fmt::Display for RangeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeParseError::Empty => write!(f, "empty range descriptor"),
            RangeParseError::EmptyPart => write!(f, "empty range between commas"),
            RangeParseError::NotANumber { part } => write!(f, "'{}' is not a frame number", part),
            RangeParseError::MalformedSeparator { part } => {
                write!(f, "'{}' is not a start-end pair", part)
            }
        }
    }
}

impl std::error::Error for RangeParseError {}

/// Parse `"a-b, c, d-e"` into `(start, end)` pairs in descriptor order.
///
/// A bare number `N` reads as `N-N`. Pairs with `start > end` are returned as
/// written; rejecting them is the validator's decision.
pub fn parse_descriptor(text: &str) -> Result<Vec<(u64, u64)>, RangeParseError> {
    if text.trim().is_empty() {
        return Err(RangeParseError::Empty);
    }
    text.split(',').map(parse_part).collect()
}

fn parse_part(part: &str) -> Result<(u64, u64), RangeParseError> {
    let part = part.trim();
    if part.is_empty() {
        return Err(RangeParseError::EmptyPart);
    }

    let pieces: Vec<&str> = part.split('-').map(str::trim).collect();
    match pieces.as_slice() {
        [single] => {
            let frame = parse_frame_number(single, part)?;
            Ok((frame, frame))
        }
        [start, end] if !start.is_empty() && !end.is_empty() => {
            Ok((parse_frame_number(start, part)?, parse_frame_number(end, part)?))
        }
        _ => Err(RangeParseError::MalformedSeparator {
            part: part.to_string(),
        }),
    }
}

fn parse_frame_number(digits: &str, part: &str) -> Result<u64, RangeParseError> {
    // u64::from_str accepts a leading '+', frame numbers never carry one
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RangeParseError::NotANumber {
            part: part.to_string(),
        });
    }
    digits.parse::<u64>().map_err(|_| RangeParseError::NotANumber {
        part: part.to_string(),
    })
}

/// Canonical text for a parsed pair: `"a"` for a single frame, `"a-b"` otherwise
pub fn canonical_range(start: u64, end: u64) -> String {
    if start == end {
        start.to_string()
    } else {
        format!("{}-{}", start, end)
    }
}
