//! Joining Baselight references with Xytech orders

use tracing::debug;

use crate::domain::model::*;

/// Strategy for pairing frame references with order records
pub trait MatchStrategy: Send + Sync {
    /// Short name used in logs and reports
    fn name(&self) -> &'static str;

    fn pair(&self, references: &[FrameReference], orders: &[OrderRecord]) -> Vec<MatchedRecord>;
}

/// Pairs the n-th reference with the n-th order.
///
/// Both sources must be aligned row for row; nothing checks that they are.
/// Surplus rows on the longer side are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalMatch;

impl MatchStrategy for PositionalMatch {
    fn name(&self) -> &'static str {
        "positional"
    }

    fn pair(&self, references: &[FrameReference], orders: &[OrderRecord]) -> Vec<MatchedRecord> {
        if references.len() != orders.len() {
            debug!(
                references = references.len(),
                orders = orders.len(),
                "Source lengths differ, surplus rows are dropped"
            );
        }

        references
            .iter()
            .zip(orders)
            .map(|(reference, order)| MatchedRecord::join(order, reference))
            .collect()
    }
}

/// Pair with the default positional strategy
pub fn match_records(references: &[FrameReference], orders: &[OrderRecord]) -> Vec<MatchedRecord> {
    PositionalMatch.pair(references, orders)
}
