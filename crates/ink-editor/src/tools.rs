//! Tool state: which tool is active and how new strokes are styled.
//!
//! Tool modes are a closed enum matched exhaustively, so adding a mode
//! is a compile-time-checked change everywhere input is routed. Exactly
//! one mode is active at a time; the mode decides how the gesture router
//! interprets a one-finger touch.

use ink_core::config::EngineConfig;
use ink_core::model::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolKind {
    #[default]
    Draw,
    Erase,
    Pan,
}

/// Live tool settings. Changing these never touches committed strokes —
/// color and width are copied into each stroke at commit time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolState {
    pub kind: ToolKind,
    pub color: Color,
    /// Width for new strokes, canvas units.
    pub width: f32,
    /// Eraser radius, screen pixels.
    pub eraser_radius: f32,
}

impl ToolState {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            kind: ToolKind::Draw,
            color: Color::BLACK,
            width: 2.0,
            eraser_radius: config.eraser_radius,
        }
    }
}
