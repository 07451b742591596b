//! Compact range notation for frame lists

use crate::domain::errors::DomainError;
use crate::domain::model::FrameInterval;
use crate::domain::rules::range_parser::parse_descriptor;

/// Collapse frame numbers into `"a-b, c, d-e"` notation.
///
/// Consecutive numbers form one run. The input is expected in strictly
/// increasing order; any other step simply starts a new run. Empty input
/// gives an empty string.
pub fn format_frames(frames: &[u64]) -> String {
    let mut iter = frames.iter().copied();
    let first = match iter.next() {
        Some(frame) => frame,
        None => return String::new(),
    };

    let mut runs = Vec::new();
    let (mut start, mut end) = (first, first);
    for frame in iter {
        if end.checked_add(1) == Some(frame) {
            end = frame;
        } else {
            runs.push(FrameInterval { start, end });
            start = frame;
            end = frame;
        }
    }
    runs.push(FrameInterval { start, end });

    join_intervals(&runs)
}

/// Every frame covered by an interval, ascending
pub fn expand(interval: &FrameInterval) -> impl Iterator<Item = u64> {
    interval.start..=interval.end
}

/// Inverse of [`format_frames`]: read a descriptor back into its frames
pub fn parse_frames(text: &str) -> Result<Vec<u64>, DomainError> {
    let pairs = parse_descriptor(text).map_err(|e| DomainError::InvalidFormat(e.to_string()))?;

    let mut frames = Vec::new();
    for (start, end) in pairs {
        let interval = FrameInterval::new(start, end)?;
        frames.extend(expand(&interval));
    }
    Ok(frames)
}

/// Sort intervals and merge the ones that overlap or touch
pub fn merge_intervals(mut intervals: Vec<FrameInterval>) -> Vec<FrameInterval> {
    intervals.sort();

    let mut merged: Vec<FrameInterval> = Vec::with_capacity(intervals.len());
    for interval in intervals {
        match merged.last_mut() {
            Some(last) if interval.start <= last.end.saturating_add(1) => {
                last.end = last.end.max(interval.end);
            }
            _ => merged.push(interval),
        }
    }
    merged
}

/// Same notation as [`format_frames`] without expanding every frame
pub fn format_intervals(intervals: &[FrameInterval]) -> String {
    join_intervals(&merge_intervals(intervals.to_vec()))
}

fn join_intervals(intervals: &[FrameInterval]) -> String {
    intervals
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
