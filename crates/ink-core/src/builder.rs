//! Path builder: accumulates one stroke's worth of canvas-space points
//! and turns them into a descriptor on release.
//!
//! The builder owns the transient in-progress state only. Nothing it
//! holds is persisted until [`PathBuilder::finish`] returns a descriptor;
//! aborting mid-stroke leaves no trace.

use crate::config::EngineConfig;
use crate::emitter::emit_path;
use crate::model::PathCmd;
use crate::smooth::{Simplifier, fit_commands, polyline_commands};
use crate::transform::CanvasPoint;

#[derive(Debug)]
pub struct PathBuilder {
    /// Points kept by the simplifier, in order.
    kept: Vec<CanvasPoint>,
    /// The most recent raw sample the simplifier rejected. The gesture's
    /// true last point is kept unconditionally, so this is promoted on
    /// finish if the finger ends between kept points.
    tail: Option<CanvasPoint>,
    simplifier: Simplifier,
    smoothing: bool,
    tension: f32,
    active: bool,
}

impl PathBuilder {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            kept: Vec::new(),
            tail: None,
            simplifier: Simplifier::new(config.simplify_tolerance),
            smoothing: config.smoothing,
            tension: config.tension,
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Start a new stroke at `p`. Any unfinished stroke is discarded.
    pub fn begin(&mut self, p: CanvasPoint) {
        self.kept.clear();
        self.tail = None;
        self.simplifier.reset();
        self.simplifier.accept(p);
        self.kept.push(p);
        self.active = true;
    }

    /// Append a sample. Ignored when no stroke is active.
    pub fn extend(&mut self, p: CanvasPoint) {
        if !self.active {
            return;
        }
        if self.simplifier.accept(p) {
            self.kept.push(p);
            self.tail = None;
        } else {
            self.tail = Some(p);
        }
    }

    /// The smoothed (or polyline) commands for the live preview,
    /// including the current finger position as a provisional endpoint.
    pub fn preview(&self) -> Vec<PathCmd> {
        match self.tail {
            Some(tail) => {
                let mut points = self.kept.clone();
                points.push(tail);
                self.fit(&points)
            }
            None => self.fit(&self.kept),
        }
    }

    /// Complete the stroke. Returns the emitted descriptor, or `None`
    /// for a degenerate gesture (a tap, or a wiggle that never left the
    /// starting point). The in-progress buffer clears either way.
    pub fn finish(&mut self) -> Option<String> {
        // The final raw point is kept unconditionally.
        if let Some(tail) = self.tail.take()
            && self.kept.last() != Some(&tail)
        {
            self.kept.push(tail);
        }

        let cmds = self.fit(&self.kept);
        self.abort();

        if cmds.len() < 2 {
            log::debug!("degenerate stroke, nothing committed");
            return None;
        }
        Some(emit_path(&cmds))
    }

    /// Discard the in-progress stroke without committing anything.
    pub fn abort(&mut self) {
        self.kept.clear();
        self.tail = None;
        self.simplifier.reset();
        self.active = false;
    }

    fn fit(&self, points: &[CanvasPoint]) -> Vec<PathCmd> {
        if self.smoothing {
            fit_commands(points, self.tension)
        } else {
            polyline_commands(points)
        }
    }
}
