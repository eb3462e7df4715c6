//! Stroke smoothing: streaming point simplification plus a
//! Catmull-Rom-derived cubic fit.
//!
//! Both stages run while the finger is still down. The simplifier is
//! greedy and incremental — each new sample is judged against the last
//! *kept* point only, so the in-progress stroke never re-processes its
//! history. The fit is re-run over the kept points on every accepted
//! sample to keep the live preview smooth.

use crate::model::PathCmd;
use crate::transform::CanvasPoint;

/// Greedy streaming simplifier. Keeps the first point unconditionally;
/// keeps a later point only if it has moved at least `tolerance` canvas
/// units away from the last kept point. The caller is responsible for
/// force-keeping the final raw point when the gesture ends.
#[derive(Debug, Clone)]
pub struct Simplifier {
    tolerance: f32,
    last_kept: Option<CanvasPoint>,
}

impl Simplifier {
    pub fn new(tolerance: f32) -> Self {
        Self {
            tolerance,
            last_kept: None,
        }
    }

    /// Feed one sample; returns whether it was kept.
    pub fn accept(&mut self, p: CanvasPoint) -> bool {
        match self.last_kept {
            None => {
                self.last_kept = Some(p);
                true
            }
            Some(last) if last.distance_to(p) > self.tolerance => {
                self.last_kept = Some(p);
                true
            }
            Some(_) => false,
        }
    }

    pub fn last_kept(&self) -> Option<CanvasPoint> {
        self.last_kept
    }

    pub fn reset(&mut self) {
        self.last_kept = None;
    }
}

/// Fit a command list over simplified points.
///
/// 0–1 points produce nothing (a tap is not a stroke), exactly 2 degrade
/// to a straight line, and 3+ become cubic segments: for the segment
/// `P[i] → P[i+1]`,
///
/// ```text
/// cp1 = P[i]   + (P[i+1] − P[i−1]) · tension     (P[−1] clamped to P[0])
/// cp2 = P[i+1] − (P[i+1] − P[i])   · tension
/// ```
pub fn fit_commands(points: &[CanvasPoint], tension: f32) -> Vec<PathCmd> {
    if points.len() < 2 {
        return Vec::new();
    }

    let mut cmds = Vec::with_capacity(points.len());
    cmds.push(PathCmd::MoveTo(points[0].x, points[0].y));

    if points.len() == 2 {
        cmds.push(PathCmd::LineTo(points[1].x, points[1].y));
        return cmds;
    }

    for i in 0..points.len() - 1 {
        let prev = points[i.saturating_sub(1)];
        let p = points[i];
        let next = points[i + 1];

        let c1x = p.x + (next.x - prev.x) * tension;
        let c1y = p.y + (next.y - prev.y) * tension;
        let c2x = next.x - (next.x - p.x) * tension;
        let c2y = next.y - (next.y - p.y) * tension;

        cmds.push(PathCmd::CubicTo(c1x, c1y, c2x, c2y, next.x, next.y));
    }

    cmds
}

/// Fit with smoothing disabled: a plain polyline over the same points.
pub fn polyline_commands(points: &[CanvasPoint]) -> Vec<PathCmd> {
    if points.len() < 2 {
        return Vec::new();
    }

    let mut cmds = Vec::with_capacity(points.len());
    cmds.push(PathCmd::MoveTo(points[0].x, points[0].y));
    for p in &points[1..] {
        cmds.push(PathCmd::LineTo(p.x, p.y));
    }
    cmds
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn p(x: f32, y: f32) -> CanvasPoint {
        CanvasPoint::new(x, y)
    }

    #[test]
    fn simplifier_keeps_first_point() {
        let mut s = Simplifier::new(2.0);
        assert!(s.accept(p(0.0, 0.0)));
    }

    #[test]
    fn simplifier_drops_points_within_tolerance() {
        let mut s = Simplifier::new(2.0);
        s.accept(p(0.0, 0.0));
        assert!(!s.accept(p(1.0, 0.0)));
        assert!(!s.accept(p(0.0, 1.9)));
        // Still judged against (0,0), not the dropped samples.
        assert!(s.accept(p(2.5, 0.0)));
    }

    #[test]
    fn simplifier_chains_from_last_kept() {
        let mut s = Simplifier::new(2.0);
        s.accept(p(0.0, 0.0));
        s.accept(p(3.0, 0.0));
        assert!(!s.accept(p(4.0, 0.0)));
        assert!(s.accept(p(6.0, 0.0)));
    }

    #[test]
    fn fit_nothing_for_single_point() {
        assert_eq!(fit_commands(&[p(1.0, 1.0)], 0.3), vec![]);
        assert_eq!(fit_commands(&[], 0.3), vec![]);
    }

    #[test]
    fn fit_two_points_is_a_line() {
        let cmds = fit_commands(&[p(0.0, 0.0), p(10.0, 0.0)], 0.3);
        assert_eq!(
            cmds,
            vec![PathCmd::MoveTo(0.0, 0.0), PathCmd::LineTo(10.0, 0.0)]
        );
    }

    #[test]
    fn fit_three_points_produces_cubics_through_inputs() {
        let pts = [p(0.0, 0.0), p(10.0, 10.0), p(20.0, 0.0)];
        let cmds = fit_commands(&pts, 0.3);
        assert_eq!(cmds.len(), 3);
        assert_eq!(cmds[0], PathCmd::MoveTo(0.0, 0.0));

        // Every segment ends exactly on an input point.
        match cmds[1] {
            PathCmd::CubicTo(_, _, _, _, x, y) => assert_eq!((x, y), (10.0, 10.0)),
            other => panic!("expected cubic, got {other:?}"),
        }
        match cmds[2] {
            PathCmd::CubicTo(_, _, _, _, x, y) => assert_eq!((x, y), (20.0, 0.0)),
            other => panic!("expected cubic, got {other:?}"),
        }
    }

    #[test]
    fn fit_first_segment_clamps_missing_neighbor() {
        let pts = [p(0.0, 0.0), p(10.0, 0.0), p(20.0, 0.0)];
        let cmds = fit_commands(&pts, 0.3);
        // cp1 of the first segment uses P[0] for the missing P[-1]:
        // cp1 = P0 + (P1 − P0) · t = (3, 0).
        match cmds[1] {
            PathCmd::CubicTo(c1x, c1y, ..) => {
                assert!((c1x - 3.0).abs() < 1e-5);
                assert!(c1y.abs() < 1e-5);
            }
            other => panic!("expected cubic, got {other:?}"),
        }
    }

    #[test]
    fn polyline_matches_inputs() {
        let cmds = polyline_commands(&[p(1.0, 2.0), p(3.0, 4.0), p(5.0, 6.0)]);
        assert_eq!(
            cmds,
            vec![
                PathCmd::MoveTo(1.0, 2.0),
                PathCmd::LineTo(3.0, 4.0),
                PathCmd::LineTo(5.0, 6.0),
            ]
        );
    }
}
