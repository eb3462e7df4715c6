pub mod hit;
pub mod paint;

pub use hit::strokes_hit;
pub use paint::{Frame, LiveStroke, PaintOp, RenderError, build_frame};
