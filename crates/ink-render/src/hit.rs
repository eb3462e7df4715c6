//! Eraser hit testing: canvas point + radius → set of strokes to remove.
//!
//! Whole-stroke erasure: a stroke is hit if *any* of its on-curve points
//! lies within the radius; there is no path splitting. The scan is
//! O(strokes × points) per touch sample, which is fine at note scale
//! (tens to low hundreds of strokes).

use ink_core::id::StrokeId;
use ink_core::model::{StrokeRecord, on_curve_points};
use ink_core::transform::CanvasPoint;

/// Ids of every stroke with at least one sample point within `radius`
/// canvas units of `center`. Order follows the input list.
pub fn strokes_hit(strokes: &[StrokeRecord], center: CanvasPoint, radius: f32) -> Vec<StrokeId> {
    strokes
        .iter()
        .filter(|stroke| stroke_hit(stroke, center, radius))
        .map(|stroke| stroke.id)
        .collect()
}

fn stroke_hit(stroke: &StrokeRecord, center: CanvasPoint, radius: f32) -> bool {
    match stroke.decode() {
        Ok(cmds) => on_curve_points(&cmds)
            .any(|(x, y)| CanvasPoint::new(x, y).distance_to(center) <= radius),
        Err(err) => {
            // Malformed data is filtered at load/save; if one slips
            // through it is simply never hit.
            log::warn!("hit test skipping malformed stroke {}: {err}", stroke.id);
            false
        }
    }
}
