//! Core data model for Inkpad notes.
//!
//! A note is an ordered list of committed strokes over a background
//! template. Each stroke stores its geometry as a compact path descriptor
//! string (see [`crate::parser`] / [`crate::emitter`] for the grammar);
//! color and width are fixed at commit time and never edited afterwards.

use crate::id::StrokeId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ─── Color ───────────────────────────────────────────────────────────────

/// RGBA color, 4 × f32 in [0.0, 1.0]. Serialized as a hex string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Parse `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA`. The leading `#`
    /// is optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        // Expand the short forms so a single path handles all four.
        let expanded: String = match hex.len() {
            3 | 4 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 | 8 => hex.to_string(),
            _ => return None,
        };

        let channel = |i: usize| -> Option<f32> {
            u8::from_str_radix(&expanded[i * 2..i * 2 + 2], 16)
                .ok()
                .map(|v| v as f32 / 255.0)
        };

        Some(Self {
            r: channel(0)?,
            g: channel(1)?,
            b: channel(2)?,
            a: if expanded.len() == 8 { channel(3)? } else { 1.0 },
        })
    }

    /// Emit as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        let (r, g, b, a) = (q(self.r), q(self.g), q(self.b), q(self.a));
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s).ok_or_else(|| serde::de::Error::custom(format!("bad color {s:?}")))
    }
}

// ─── Path commands ───────────────────────────────────────────────────────

/// One decoded segment of a stroke descriptor.
///
/// The descriptor grammar only ever produces an initial move followed by
/// lines or cubics, so there is no close command and no quadratic form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCmd {
    MoveTo(f32, f32),
    LineTo(f32, f32),
    /// c1, c2, end.
    CubicTo(f32, f32, f32, f32, f32, f32),
}

impl PathCmd {
    /// The on-curve endpoint of this command.
    pub fn end_point(&self) -> (f32, f32) {
        match *self {
            PathCmd::MoveTo(x, y) | PathCmd::LineTo(x, y) => (x, y),
            PathCmd::CubicTo(_, _, _, _, x, y) => (x, y),
        }
    }
}

/// The ordered on-curve points of a decoded descriptor — the same
/// sequence the eraser hit-tests against.
pub fn on_curve_points(cmds: &[PathCmd]) -> impl Iterator<Item = (f32, f32)> + '_ {
    cmds.iter().map(PathCmd::end_point)
}

// ─── Strokes ─────────────────────────────────────────────────────────────

/// A committed stroke. Immutable once created: erasing removes the whole
/// record, and later color/width changes never touch existing strokes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeRecord {
    pub id: StrokeId,
    /// Path descriptor string, e.g. `"M10.0,10.0 L20.0,10.0"`.
    pub data: String,
    pub color: Color,
    /// Line width in canvas units.
    pub width: f32,
}

impl StrokeRecord {
    /// Decode the descriptor back into commands.
    pub fn decode(&self) -> Result<Vec<PathCmd>, crate::parser::PathError> {
        crate::parser::parse_path(&self.data)
    }

    /// Whether the descriptor parses. Records failing this are dropped
    /// during load and save, never rendered, and never hit-tested.
    pub fn is_well_formed(&self) -> bool {
        self.decode().is_ok()
    }
}

// ─── Templates ───────────────────────────────────────────────────────────

/// Background pattern behind the strokes. Purely cosmetic: templates
/// carry no drawing semantics and are not part of any stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    #[default]
    Blank,
    Dotted,
    Lined,
    Grid,
}

// ─── Notes ───────────────────────────────────────────────────────────────

/// A note as handed to the engine by the host. The engine reads the
/// stroke list on mount and emits a full replacement list on every
/// committed change; it never mutates a list it was handed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub title: String,
    pub template: Template,
    pub strokes: Vec<StrokeRecord>,
    /// Millisecond timestamps supplied by the host; the engine has no clock.
    pub created_ms: u64,
    pub modified_ms: u64,
}

impl Note {
    pub fn new(title: impl Into<String>, template: Template, created_ms: u64) -> Self {
        Self {
            title: title.into(),
            template,
            strokes: Vec::new(),
            created_ms,
            modified_ms: created_ms,
        }
    }

    /// Drop strokes with empty or unparsable descriptors and register
    /// every surviving id with the id source. Returns how many were
    /// dropped. Run on both load and save so one corrupt stroke can
    /// never take the rest of a note with it.
    pub fn sanitize(&mut self) -> usize {
        let before = self.strokes.len();
        self.strokes.retain(|stroke| {
            if stroke.is_well_formed() {
                stroke.id.observe();
                true
            } else {
                log::warn!("dropping malformed stroke {}: {:?}", stroke.id, stroke.data);
                false
            }
        });
        before - self.strokes.len()
    }
}
