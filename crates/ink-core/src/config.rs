//! Engine configuration.
//!
//! All knobs default to the values the engine was tuned with; hosts
//! usually load overrides from JSON once at startup and pass the config
//! down by reference.

use serde::{Deserialize, Serialize};

/// Tunables for the drawing engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Minimum zoom scale (screen px per canvas unit). Default **0.2**.
    pub min_scale: f32,

    /// Maximum zoom scale. Default **8.0**.
    pub max_scale: f32,

    /// Streaming simplifier tolerance, canvas units. Default **2.0**.
    pub simplify_tolerance: f32,

    /// Curve-fit strokes instead of raw polylines. Default **true**.
    pub smoothing: bool,

    /// Catmull-Rom tension used by the fit. Default **0.3**.
    pub tension: f32,

    /// Eraser radius in *screen* pixels; divided by the current scale
    /// before hit-testing in canvas space. Default **15.0**.
    pub eraser_radius: f32,

    /// Quiet period after the last mutation before a background save
    /// fires. Default **1000** ms.
    pub autosave_debounce_ms: u64,

    /// Spacing of the dotted/lined/grid background, canvas units.
    /// Default **40.0**.
    pub template_spacing: f32,

    /// Minimum initial distance between two fingers (screen px) before a
    /// pinch produces a zoom factor; guards the division by the initial
    /// distance. Default **10.0**.
    pub min_pinch_distance: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.2,
            max_scale: 8.0,
            simplify_tolerance: 2.0,
            smoothing: true,
            tension: 0.3,
            eraser_radius: 15.0,
            autosave_debounce_ms: 1000,
            template_spacing: 40.0,
            min_pinch_distance: 10.0,
        }
    }
}

impl EngineConfig {
    /// Parse a JSON override file. Missing fields keep their defaults.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
