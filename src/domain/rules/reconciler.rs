//! Residual set of ranges that were never matched

use std::collections::HashSet;

use crate::domain::model::*;
use crate::domain::rules::range_parser::{canonical_range, parse_descriptor};

/// Split every reference into one reference per range, in canonical text.
///
/// A descriptor that does not parse stays whole so it can still be reported.
pub fn flatten_ranges(references: &[FrameReference]) -> Vec<FrameReference> {
    let mut flattened = Vec::with_capacity(references.len());
    for reference in references {
        match parse_descriptor(&reference.frames) {
            Ok(pairs) => flattened.extend(pairs.into_iter().map(|(start, end)| {
                let text = if start > end {
                    format!("{}-{}", start, end)
                } else {
                    canonical_range(start, end)
                };
                FrameReference::new(reference.filename.clone(), text)
            })),
            Err(_) => flattened.push(reference.clone()),
        }
    }
    flattened
}

/// Entries of `all` whose range text appears in no matched record.
///
/// Membership is exact string equality on the range text, not interval
/// overlap. Output keeps the order of `all`.
pub fn reconcile(all: &[FrameReference], matched: &[MatchedRecord]) -> Vec<UnusedEntry> {
    let used: HashSet<&str> = matched.iter().map(|record| record.frames.as_str()).collect();

    all.iter()
        .filter(|reference| !used.contains(reference.frames.as_str()))
        .map(|reference| UnusedEntry {
            filename: reference.filename.clone(),
            frames: reference.frames.clone(),
        })
        .collect()
}

/// Like [`reconcile`], keyed on `(filename, frames)` so a range matched in one
/// file does not hide the same range text in another.
pub fn reconcile_per_file(all: &[FrameReference], matched: &[MatchedRecord]) -> Vec<UnusedEntry> {
    let used: HashSet<(&str, &str)> = matched
        .iter()
        .map(|record| (record.filename.as_str(), record.frames.as_str()))
        .collect();

    all.iter()
        .filter(|reference| !used.contains(&(reference.filename.as_str(), reference.frames.as_str())))
        .map(|reference| UnusedEntry {
            filename: reference.filename.clone(),
            frames: reference.frames.clone(),
        })
        .collect()
}
