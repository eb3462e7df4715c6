//! Screen ↔ canvas coordinate transforms.
//!
//! Touch input arrives in screen space (device pixels); persisted stroke
//! geometry lives in canvas space, invariant under pan and zoom. The two
//! spaces get distinct point types so they cannot be mixed up, and the
//! mapping is a pair of exact-inverse pure functions:
//!
//! ```text
//! canvas = (screen − translate) / scale
//! screen = canvas · scale + translate
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in screen space (device pixels, origin at the view's corner).
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

/// A point in canvas space, independent of the current pan/zoom.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: ScreenPoint) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn midpoint(self, other: ScreenPoint) -> ScreenPoint {
        ScreenPoint::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

impl CanvasPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: CanvasPoint) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

impl fmt::Display for ScreenPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.02},{:.02}", self.x, self.y)
    }
}

impl fmt::Display for CanvasPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.02},{:.02}", self.x, self.y)
    }
}

/// The live pan/zoom state of the canvas view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasTransform {
    /// Screen pixels per canvas unit. Always positive and finite;
    /// callers clamp it through [`CanvasTransform::set_scale_clamped`].
    pub scale: f32,
    /// Screen-space offset of the canvas origin.
    pub translate_x: f32,
    pub translate_y: f32,
}

impl Default for CanvasTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
        }
    }
}

impl CanvasTransform {
    pub fn to_canvas(&self, p: ScreenPoint) -> CanvasPoint {
        CanvasPoint::new(
            (p.x - self.translate_x) / self.scale,
            (p.y - self.translate_y) / self.scale,
        )
    }

    pub fn to_screen(&self, p: CanvasPoint) -> ScreenPoint {
        ScreenPoint::new(
            p.x * self.scale + self.translate_x,
            p.y * self.scale + self.translate_y,
        )
    }

    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        self.translate_x += dx;
        self.translate_y += dy;
    }

    /// Set the scale, clamped to `[min, max]`. Infinities clamp to the
    /// nearest bound; NaN is ignored outright, so a degenerate pinch can
    /// never poison the transform.
    pub fn set_scale_clamped(&mut self, next: f32, min: f32, max: f32) {
        if !next.is_nan() {
            self.scale = next.clamp(min, max);
        }
    }

    /// Re-derive the translation so `anchor` lands exactly at screen
    /// position `at` under the current scale. This is what keeps the
    /// canvas point under a pinch midpoint pinned while zooming.
    pub fn pin(&mut self, anchor: CanvasPoint, at: ScreenPoint) {
        self.translate_x = at.x - anchor.x * self.scale;
        self.translate_y = at.y - anchor.y * self.scale;
    }
}
