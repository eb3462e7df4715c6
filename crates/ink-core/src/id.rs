use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide id source. Never reset, never reused within a process;
/// `observe` advances it past ids loaded from disk so reloading a note
/// cannot mint a colliding id.
static NEXT: AtomicU64 = AtomicU64::new(1);

/// A stable identifier for a committed stroke.
/// Assigned once when the stroke is committed; survives save/load.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StrokeId(u64);

impl StrokeId {
    /// Mint a fresh id, unique within this process.
    pub fn fresh() -> Self {
        StrokeId(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Tell the id source about an id seen in loaded data, so later
    /// `fresh()` calls stay above it.
    pub fn observe(self) {
        NEXT.fetch_max(self.0 + 1, Ordering::Relaxed);
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl From<u64> for StrokeId {
    fn from(raw: u64) -> Self {
        StrokeId(raw)
    }
}

impl fmt::Debug for StrokeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for StrokeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
