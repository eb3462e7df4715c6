//! Gesture router: classifies the touch stream into draw / erase / pan /
//! zoom and owns the live pan/zoom state.
//!
//! One transition function over (state, event) in the shape of a small
//! table; every arm returns the next state. Two simultaneous fingers
//! always mean navigation: a pinch starting mid-draw aborts the stroke
//! uncommitted, so an accidental second finger can never leave a stray
//! mark.

use crate::input::{TouchEvent, TouchPhase};
use crate::tools::{ToolKind, ToolState};
use ink_core::builder::PathBuilder;
use ink_core::config::EngineConfig;
use ink_core::model::PathCmd;
use ink_core::transform::{CanvasPoint, CanvasTransform, ScreenPoint};

/// What a handled event asks the session to do. Pan and zoom are
/// absorbed into the router's own transform; only mutations of the
/// stroke list surface as actions.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasAction {
    /// A finished stroke descriptor ready to become a record.
    CommitStroke { data: String },
    /// Hit-test and remove strokes around `center` (canvas space,
    /// radius already converted to canvas units).
    EraseAt { center: CanvasPoint, radius: f32 },
}

/// Pinch bookkeeping captured when the second finger lands.
#[derive(Debug, Clone, Copy)]
struct Pinch {
    initial_distance: f32,
    initial_scale: f32,
    /// The canvas point under the initial midpoint; kept pinned under
    /// the (possibly moving) midpoint for the whole gesture.
    anchor: CanvasPoint,
}

#[derive(Debug, Clone, Copy, Default)]
enum RouterState {
    #[default]
    Idle,
    Drawing,
    Erasing,
    Panning {
        last: ScreenPoint,
    },
    Zooming(Pinch),
}

pub struct GestureRouter {
    state: RouterState,
    transform: CanvasTransform,
    builder: PathBuilder,
    config: EngineConfig,
    /// Most recent touch position, for the eraser cursor preview.
    last_touch: Option<ScreenPoint>,
}

impl GestureRouter {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            state: RouterState::default(),
            transform: CanvasTransform::default(),
            builder: PathBuilder::new(config),
            config: config.clone(),
            last_touch: None,
        }
    }

    pub fn transform(&self) -> &CanvasTransform {
        &self.transform
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, RouterState::Drawing)
    }

    pub fn is_erasing(&self) -> bool {
        matches!(self.state, RouterState::Erasing)
    }

    /// Smoothed commands of the in-progress stroke, for the live preview.
    pub fn live_preview(&self) -> Option<Vec<PathCmd>> {
        self.is_drawing().then(|| self.builder.preview())
    }

    pub fn last_touch(&self) -> Option<ScreenPoint> {
        self.last_touch
    }

    /// Host-side interruption: discard any in-progress gesture.
    pub fn interrupt(&mut self) {
        self.builder.abort();
        self.state = RouterState::Idle;
        self.last_touch = None;
    }

    /// Route one touch frame. Returns the stroke-list mutations it
    /// produced; pan/zoom mutate the owned transform directly.
    pub fn handle(&mut self, event: &TouchEvent, tool: &ToolState) -> Vec<CanvasAction> {
        use RouterState as S;
        use TouchPhase as P;

        let mut actions = Vec::new();
        self.last_touch = event.first().or(self.last_touch);

        self.state = match (self.state, event.phase) {
            // Two fingers trump everything: abort any stroke, zoom.
            (state, P::Start) if event.count() >= 2 => {
                if matches!(state, S::Drawing) {
                    log::debug!("second finger landed mid-draw, aborting stroke");
                    self.builder.abort();
                }
                self.begin_pinch(event)
            }

            (S::Idle, P::Start) => match (tool.kind, event.first()) {
                (ToolKind::Draw, Some(touch)) => {
                    self.builder.begin(self.transform.to_canvas(touch));
                    S::Drawing
                }
                (ToolKind::Erase, Some(touch)) => {
                    actions.push(self.erase_at(touch, tool));
                    S::Erasing
                }
                (ToolKind::Pan, Some(touch)) => S::Panning { last: touch },
                (_, None) => S::Idle,
            },

            (S::Drawing, P::Move) => {
                if let Some(touch) = event.first() {
                    self.builder.extend(self.transform.to_canvas(touch));
                }
                S::Drawing
            }

            (S::Drawing, P::End) => {
                if let Some(data) = self.builder.finish() {
                    actions.push(CanvasAction::CommitStroke { data });
                }
                S::Idle
            }

            (S::Drawing, P::Cancel) => {
                self.builder.abort();
                S::Idle
            }

            // Each erase sample hit-tests immediately; there is no
            // finish step.
            (S::Erasing, P::Move) => {
                if let Some(touch) = event.first() {
                    actions.push(self.erase_at(touch, tool));
                }
                S::Erasing
            }

            (S::Erasing, P::End | P::Cancel) => S::Idle,

            (S::Panning { last }, P::Move) => match event.first() {
                Some(touch) => {
                    self.transform.pan_by(touch.x - last.x, touch.y - last.y);
                    S::Panning { last: touch }
                }
                None => S::Panning { last },
            },

            (S::Panning { .. }, P::End | P::Cancel) => S::Idle,

            (S::Zooming(pinch), P::Move) if event.count() >= 2 => {
                self.apply_pinch(pinch, event.touches[0], event.touches[1]);
                S::Zooming(pinch)
            }

            // One finger lifted mid-pinch: the survivor keeps panning.
            (S::Zooming(_), P::End) if event.count() == 1 => S::Panning {
                last: event.touches[0],
            },

            (S::Zooming(_), P::End | P::Cancel) => S::Idle,

            (any, _) => any,
        };

        actions
    }

    fn begin_pinch(&mut self, event: &TouchEvent) -> RouterState {
        let (a, b) = (event.touches[0], event.touches[1]);
        let distance = a.distance_to(b);

        // A degenerate pinch would divide by ~zero; ignore it until the
        // fingers separate.
        if distance < self.config.min_pinch_distance {
            log::debug!("pinch ignored, fingers too close ({distance:.1}px)");
            return RouterState::Idle;
        }

        RouterState::Zooming(Pinch {
            initial_distance: distance,
            initial_scale: self.transform.scale,
            anchor: self.transform.to_canvas(a.midpoint(b)),
        })
    }

    fn apply_pinch(&mut self, pinch: Pinch, a: ScreenPoint, b: ScreenPoint) {
        let next = pinch.initial_scale * (a.distance_to(b) / pinch.initial_distance);
        self.transform
            .set_scale_clamped(next, self.config.min_scale, self.config.max_scale);
        // Zoom is anchored at the gesture's center, not the canvas
        // origin, and follows the midpoint if it drifts.
        self.transform.pin(pinch.anchor, a.midpoint(b));
    }

    fn erase_at(&self, touch: ScreenPoint, tool: &ToolState) -> CanvasAction {
        CanvasAction::EraseAt {
            center: self.transform.to_canvas(touch),
            // The radius is specified in screen pixels.
            radius: tool.eraser_radius / self.transform.scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn router() -> GestureRouter {
        GestureRouter::new(&EngineConfig {
            smoothing: false,
            ..Default::default()
        })
    }

    fn draw_tool() -> ToolState {
        ToolState::new(&EngineConfig::default())
    }

    fn erase_tool() -> ToolState {
        ToolState {
            kind: ToolKind::Erase,
            ..draw_tool()
        }
    }

    fn pan_tool() -> ToolState {
        ToolState {
            kind: ToolKind::Pan,
            ..draw_tool()
        }
    }

    #[test]
    fn draw_gesture_commits_descriptor() {
        let mut r = router();
        let tool = draw_tool();
        assert!(r.handle(&TouchEvent::start(10.0, 10.0), &tool).is_empty());
        assert!(r.handle(&TouchEvent::moved(20.0, 10.0), &tool).is_empty());
        assert!(r.handle(&TouchEvent::moved(20.0, 20.0), &tool).is_empty());

        let actions = r.handle(&TouchEvent::end(), &tool);
        assert_eq!(
            actions,
            vec![CanvasAction::CommitStroke {
                data: "M10.0,10.0 L20.0,10.0 L20.0,20.0".into()
            }]
        );
        assert!(!r.is_drawing());
    }

    #[test]
    fn tap_commits_nothing() {
        let mut r = router();
        let tool = draw_tool();
        r.handle(&TouchEvent::start(5.0, 5.0), &tool);
        assert!(r.handle(&TouchEvent::end(), &tool).is_empty());
    }

    #[test]
    fn draw_points_are_canvas_space() {
        let mut r = router();
        let tool = draw_tool();

        // Pan first so screen and canvas space differ.
        let pan = pan_tool();
        r.handle(&TouchEvent::start(0.0, 0.0), &pan);
        r.handle(&TouchEvent::moved(30.0, 40.0), &pan);
        r.handle(&TouchEvent::end(), &pan);

        r.handle(&TouchEvent::start(30.0, 40.0), &tool);
        r.handle(&TouchEvent::moved(40.0, 40.0), &tool);
        let actions = r.handle(&TouchEvent::end(), &tool);
        assert_eq!(
            actions,
            vec![CanvasAction::CommitStroke {
                data: "M0.0,0.0 L10.0,0.0".into()
            }]
        );
    }

    #[test]
    fn second_finger_aborts_stroke_and_zooms() {
        let mut r = router();
        let tool = draw_tool();
        r.handle(&TouchEvent::start(10.0, 10.0), &tool);
        r.handle(&TouchEvent::moved(20.0, 10.0), &tool);

        let actions = r.handle(
            &TouchEvent::second_finger(
                ScreenPoint::new(20.0, 10.0),
                ScreenPoint::new(120.0, 10.0),
            ),
            &tool,
        );
        assert!(actions.is_empty(), "aborted stroke must not commit");
        assert!(!r.is_drawing());

        // Spreading the fingers zooms in.
        r.handle(
            &TouchEvent::pinch_move(ScreenPoint::new(0.0, 10.0), ScreenPoint::new(200.0, 10.0)),
            &tool,
        );
        assert!(r.transform().scale > 1.0);

        // Releasing everything never resurrects the stroke.
        assert!(r.handle(&TouchEvent::end(), &tool).is_empty());
    }

    #[test]
    fn pinch_scale_stays_clamped() {
        let mut r = router();
        let tool = draw_tool();
        let config = EngineConfig::default();

        for _ in 0..4 {
            r.handle(
                &TouchEvent::second_finger(
                    ScreenPoint::new(0.0, 0.0),
                    ScreenPoint::new(20.0, 0.0),
                ),
                &tool,
            );
            r.handle(
                &TouchEvent::pinch_move(
                    ScreenPoint::new(0.0, 0.0),
                    ScreenPoint::new(4000.0, 0.0),
                ),
                &tool,
            );
            r.handle(&TouchEvent::end(), &tool);
        }
        assert!(r.transform().scale <= config.max_scale);

        for _ in 0..4 {
            r.handle(
                &TouchEvent::second_finger(
                    ScreenPoint::new(0.0, 0.0),
                    ScreenPoint::new(4000.0, 0.0),
                ),
                &tool,
            );
            r.handle(
                &TouchEvent::pinch_move(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(20.0, 0.0)),
                &tool,
            );
            r.handle(&TouchEvent::end(), &tool);
        }
        assert!(r.transform().scale >= config.min_scale);
    }

    #[test]
    fn pinch_midpoint_stays_anchored() {
        let mut r = router();
        let tool = draw_tool();
        let a = ScreenPoint::new(100.0, 100.0);
        let b = ScreenPoint::new(300.0, 100.0);
        let mid = a.midpoint(b);
        let anchor = r.transform().to_canvas(mid);

        r.handle(&TouchEvent::second_finger(a, b), &tool);
        r.handle(
            &TouchEvent::pinch_move(ScreenPoint::new(50.0, 100.0), ScreenPoint::new(350.0, 100.0)),
            &tool,
        );

        let after = r.transform().to_screen(anchor);
        assert!((after.x - mid.x).abs() < 1e-2);
        assert!((after.y - mid.y).abs() < 1e-2);
    }

    #[test]
    fn zero_distance_pinch_is_ignored() {
        let mut r = router();
        let tool = draw_tool();
        let p = ScreenPoint::new(50.0, 50.0);
        r.handle(&TouchEvent::second_finger(p, p), &tool);
        // No zoom state entered, no scale change, no NaN.
        r.handle(&TouchEvent::pinch_move(p, p), &tool);
        assert_eq!(r.transform().scale, 1.0);
    }

    #[test]
    fn pan_moves_translation() {
        let mut r = router();
        let tool = pan_tool();
        r.handle(&TouchEvent::start(10.0, 10.0), &tool);
        r.handle(&TouchEvent::moved(25.0, 40.0), &tool);
        r.handle(&TouchEvent::end(), &tool);

        assert_eq!(r.transform().translate_x, 15.0);
        assert_eq!(r.transform().translate_y, 30.0);
    }

    #[test]
    fn erase_emits_action_per_sample_with_canvas_radius() {
        let mut r = router();
        let tool = erase_tool();

        let start = r.handle(&TouchEvent::start(10.0, 10.0), &tool);
        let moved = r.handle(&TouchEvent::moved(12.0, 10.0), &tool);
        assert_eq!(start.len(), 1);
        assert_eq!(moved.len(), 1);
        match &moved[0] {
            CanvasAction::EraseAt { center, radius } => {
                assert_eq!(*center, CanvasPoint::new(12.0, 10.0));
                assert_eq!(*radius, tool.eraser_radius);
            }
            other => panic!("expected erase, got {other:?}"),
        }
        assert!(r.handle(&TouchEvent::end(), &tool).is_empty());
    }

    #[test]
    fn erase_radius_converts_by_scale() {
        let mut r = router();
        let tool = erase_tool();

        // Zoom to 2× first.
        r.handle(
            &TouchEvent::second_finger(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(100.0, 0.0)),
            &tool,
        );
        r.handle(
            &TouchEvent::pinch_move(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(200.0, 0.0)),
            &tool,
        );
        r.handle(&TouchEvent::end(), &tool);
        assert_eq!(r.transform().scale, 2.0);

        let actions = r.handle(&TouchEvent::start(10.0, 10.0), &tool);
        match &actions[0] {
            CanvasAction::EraseAt { radius, .. } => {
                assert_eq!(*radius, tool.eraser_radius / 2.0);
            }
            other => panic!("expected erase, got {other:?}"),
        }
    }

    #[test]
    fn cancel_discards_stroke() {
        let mut r = router();
        let tool = draw_tool();
        r.handle(&TouchEvent::start(0.0, 0.0), &tool);
        r.handle(&TouchEvent::moved(50.0, 50.0), &tool);
        assert!(r.handle(&TouchEvent::cancel(), &tool).is_empty());
        assert!(!r.is_drawing());
    }

    #[test]
    fn lifting_one_pinch_finger_demotes_to_pan() {
        let mut r = router();
        let tool = draw_tool();
        r.handle(
            &TouchEvent::second_finger(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(100.0, 0.0)),
            &tool,
        );

        let survivor = ScreenPoint::new(100.0, 0.0);
        r.handle(
            &TouchEvent {
                phase: TouchPhase::End,
                touches: smallvec::smallvec![survivor],
            },
            &tool,
        );

        let before = r.transform().translate_x;
        r.handle(&TouchEvent::moved(130.0, 0.0), &tool);
        assert_eq!(r.transform().translate_x, before + 30.0);
    }
}
