//! Eraser hit-testing over finalized strokes.

use crate::blocks::{DrawingBlock, Stroke};
use kurbo::Point;

/// Hit radius in local-space pixels. A stroke is removed when any of its
/// sample points falls within this distance of the erase sample.
pub const ERASE_HIT_RADIUS: f64 = 20.0;

/// Filter a stroke list against one erase sample: strokes with any point
/// within [`ERASE_HIT_RADIUS`] are removed, the rest are retained in order.
///
/// Point-level (not segment-level) testing: sample density is high relative
/// to the hit radius, so whole-point distance suffices.
pub fn filter_strokes(strokes: Vec<Stroke>, point: Point) -> Vec<Stroke> {
    strokes
        .into_iter()
        .filter(|stroke| !stroke.any_point_within(point, ERASE_HIT_RADIUS))
        .collect()
}

/// Apply one erase sample to a drawing block in place. Runs on every move
/// sample of an erase gesture; removal is immediate, not deferred to
/// gesture end. Returns the number of strokes removed.
pub fn erase_at(block: &mut DrawingBlock, point: Point) -> usize {
    let before = block.strokes.len();
    block
        .strokes
        .retain(|stroke| !stroke.any_point_within(point, ERASE_HIT_RADIUS));
    before - block.strokes.len()
}
