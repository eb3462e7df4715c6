//! Note state → renderer-agnostic paint ops.
//!
//! The engine does not own a drawing surface. Each frame it emits a flat
//! op list in screen space — background wash, template pattern, committed
//! strokes, the in-progress stroke, the eraser cursor — that an SVG-like
//! declarative surface or an immediate-mode GPU canvas replays verbatim.
//! kurbo/peniko supply the geometry and color vocabulary.

use ink_core::model::{PathCmd, StrokeRecord, Template};
use ink_core::transform::{CanvasTransform, ScreenPoint};
use kurbo::{BezPath, Point};
use peniko::Color;

/// Background wash behind everything.
const PAPER: Color = Color::from_rgb8(0xFC, 0xFB, 0xF7);
/// Template pattern ink.
const PATTERN: Color = Color::from_rgba8(0x00, 0x00, 0x00, 0x2E);
/// Skip pattern generation below this on-screen spacing: the pattern
/// would degenerate into solid grey while costing thousands of ops.
const MIN_PATTERN_SPACING_PX: f32 = 4.0;

/// One screen-space drawing instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintOp {
    Clear {
        color: Color,
    },
    Dot {
        center: Point,
        radius: f64,
        color: Color,
    },
    Line {
        from: Point,
        to: Point,
        width: f64,
        color: Color,
    },
    /// Round-capped, round-joined, unfilled.
    StrokePath {
        path: BezPath,
        width: f64,
        color: Color,
    },
    /// Eraser-radius preview ring around the touch point.
    EraserCursor {
        center: Point,
        radius: f64,
    },
    /// Shown instead of the canvas when frame building failed; the
    /// underlying note is untouched so a later rebuild can succeed.
    Placeholder {
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    pub ops: Vec<PaintOp>,
}

impl Frame {
    pub fn placeholder(message: impl Into<String>) -> Frame {
        Frame {
            ops: vec![PaintOp::Placeholder {
                message: message.into(),
            }],
        }
    }
}

/// The in-progress stroke, styled with the live tool settings.
#[derive(Debug, Clone, Copy)]
pub struct LiveStroke<'a> {
    pub cmds: &'a [PathCmd],
    pub color: ink_core::model::Color,
    /// Width in canvas units, like committed strokes.
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("canvas transform is not finite")]
    BadTransform,
}

/// Build one frame.
///
/// `viewport` is the view size in screen pixels; the template pattern is
/// generated lazily for the visible canvas region only, never for the
/// whole (unbounded) plane. Malformed strokes are skipped with a
/// warning.
pub fn build_frame(
    transform: &CanvasTransform,
    viewport: (f32, f32),
    template: Template,
    template_spacing: f32,
    strokes: &[StrokeRecord],
    live: Option<LiveStroke<'_>>,
    eraser: Option<(ScreenPoint, f32)>,
) -> Result<Frame, RenderError> {
    if !transform.scale.is_finite()
        || transform.scale <= 0.0
        || !transform.translate_x.is_finite()
        || !transform.translate_y.is_finite()
    {
        return Err(RenderError::BadTransform);
    }

    let mut ops = vec![PaintOp::Clear { color: PAPER }];

    push_template_ops(&mut ops, template, transform, viewport, template_spacing);

    for stroke in strokes {
        match stroke.decode() {
            Ok(cmds) => ops.push(PaintOp::StrokePath {
                path: to_screen_path(&cmds, transform),
                width: (stroke.width * transform.scale) as f64,
                color: to_paint(stroke.color),
            }),
            Err(err) => log::warn!("frame skipping malformed stroke {}: {err}", stroke.id),
        }
    }

    if let Some(live) = live
        && !live.cmds.is_empty()
    {
        ops.push(PaintOp::StrokePath {
            path: to_screen_path(live.cmds, transform),
            width: (live.width * transform.scale) as f64,
            color: to_paint(live.color),
        });
    }

    if let Some((center, radius)) = eraser {
        ops.push(PaintOp::EraserCursor {
            center: Point::new(center.x as f64, center.y as f64),
            radius: radius as f64,
        });
    }

    Ok(Frame { ops })
}

// ─── Template pattern ────────────────────────────────────────────────────

fn push_template_ops(
    ops: &mut Vec<PaintOp>,
    template: Template,
    transform: &CanvasTransform,
    viewport: (f32, f32),
    spacing: f32,
) {
    if template == Template::Blank {
        return;
    }
    if spacing * transform.scale < MIN_PATTERN_SPACING_PX {
        log::debug!("template pattern too dense at scale {}", transform.scale);
        return;
    }

    let (w, h) = viewport;
    let top_left = transform.to_canvas(ScreenPoint::new(0.0, 0.0));
    let bottom_right = transform.to_canvas(ScreenPoint::new(w, h));

    let i0 = (top_left.x / spacing).floor() as i64;
    let i1 = (bottom_right.x / spacing).ceil() as i64;
    let j0 = (top_left.y / spacing).floor() as i64;
    let j1 = (bottom_right.y / spacing).ceil() as i64;

    let screen_x = |i: i64| i as f32 * spacing * transform.scale + transform.translate_x;
    let screen_y = |j: i64| j as f32 * spacing * transform.scale + transform.translate_y;

    match template {
        Template::Blank => {}

        Template::Dotted => {
            for i in i0..=i1 {
                for j in j0..=j1 {
                    ops.push(PaintOp::Dot {
                        center: Point::new(screen_x(i) as f64, screen_y(j) as f64),
                        radius: 1.5,
                        color: PATTERN,
                    });
                }
            }
        }

        Template::Lined => {
            for j in j0..=j1 {
                ops.push(horizontal_line(screen_y(j), w));
            }
        }

        Template::Grid => {
            for j in j0..=j1 {
                ops.push(horizontal_line(screen_y(j), w));
            }
            for i in i0..=i1 {
                ops.push(vertical_line(screen_x(i), h));
            }
        }
    }
}

fn horizontal_line(y: f32, width: f32) -> PaintOp {
    PaintOp::Line {
        from: Point::new(0.0, y as f64),
        to: Point::new(width as f64, y as f64),
        width: 1.0,
        color: PATTERN,
    }
}

fn vertical_line(x: f32, height: f32) -> PaintOp {
    PaintOp::Line {
        from: Point::new(x as f64, 0.0),
        to: Point::new(x as f64, height as f64),
        width: 1.0,
        color: PATTERN,
    }
}

// ─── Geometry and color conversion ───────────────────────────────────────

fn to_screen_path(cmds: &[PathCmd], transform: &CanvasTransform) -> BezPath {
    let pt = |x: f32, y: f32| {
        let s = transform.to_screen(ink_core::transform::CanvasPoint::new(x, y));
        Point::new(s.x as f64, s.y as f64)
    };

    let mut bez = BezPath::new();
    for cmd in cmds {
        match *cmd {
            PathCmd::MoveTo(x, y) => bez.move_to(pt(x, y)),
            PathCmd::LineTo(x, y) => bez.line_to(pt(x, y)),
            PathCmd::CubicTo(c1x, c1y, c2x, c2y, x, y) => {
                bez.curve_to(pt(c1x, c1y), pt(c2x, c2y), pt(x, y));
            }
        }
    }
    bez
}

fn to_paint(c: ink_core::model::Color) -> Color {
    let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color::from_rgba8(q(c.r), q(c.g), q(c.b), q(c.a))
}
