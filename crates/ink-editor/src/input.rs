//! Input abstraction layer.
//!
//! Normalizes whatever the host platform reports into one event shape:
//! a phase marker plus the set of touch points active *after* the event.
//! The engine assumes nothing else about the platform's touch API.

use ink_core::transform::ScreenPoint;
use smallvec::SmallVec;

/// Gesture phase of a touch frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    /// A finger went down.
    Start,
    /// One or more active fingers moved.
    Move,
    /// A finger lifted.
    End,
    /// The host interrupted the gesture (incoming call, system dialog).
    /// In-progress strokes are discarded, never committed.
    Cancel,
}

/// One normalized touch frame.
#[derive(Debug, Clone)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    /// Touch points still active after this event, in screen space.
    /// Empty on the final `End`/`Cancel` of a gesture.
    pub touches: SmallVec<[ScreenPoint; 2]>,
}

impl TouchEvent {
    pub fn start(x: f32, y: f32) -> Self {
        Self {
            phase: TouchPhase::Start,
            touches: smallvec::smallvec![ScreenPoint::new(x, y)],
        }
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self {
            phase: TouchPhase::Move,
            touches: smallvec::smallvec![ScreenPoint::new(x, y)],
        }
    }

    /// Final release: no fingers remain down.
    pub fn end() -> Self {
        Self {
            phase: TouchPhase::End,
            touches: SmallVec::new(),
        }
    }

    pub fn cancel() -> Self {
        Self {
            phase: TouchPhase::Cancel,
            touches: SmallVec::new(),
        }
    }

    /// A second finger landing while the first is down.
    pub fn second_finger(first: ScreenPoint, second: ScreenPoint) -> Self {
        Self {
            phase: TouchPhase::Start,
            touches: smallvec::smallvec![first, second],
        }
    }

    pub fn pinch_move(a: ScreenPoint, b: ScreenPoint) -> Self {
        Self {
            phase: TouchPhase::Move,
            touches: smallvec::smallvec![a, b],
        }
    }

    pub fn first(&self) -> Option<ScreenPoint> {
        self.touches.first().copied()
    }

    pub fn count(&self) -> usize {
        self.touches.len()
    }
}
