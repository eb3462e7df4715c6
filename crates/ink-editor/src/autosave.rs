//! Debounced autosave scheduling.
//!
//! Every mutation re-arms a deadline one quiet period ahead; only the
//! state after the last mutation of a burst gets saved. Deadlines are
//! plain `Instant`s polled by the host's frame/event loop — no timer
//! threads, matching the engine's single-threaded model — and the clock
//! is always passed in, which keeps the schedule testable.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Autosave {
    debounce: Duration,
    deadline: Option<Instant>,
}

impl Autosave {
    pub fn new(debounce_ms: u64) -> Self {
        Self {
            debounce: Duration::from_millis(debounce_ms),
            deadline: None,
        }
    }

    /// A durable-worthy mutation happened: (re)arm the deadline. An
    /// already-pending save is superseded, not stacked.
    pub fn mark_dirty(&mut self, now: Instant) {
        self.deadline = Some(now + self.debounce);
    }

    pub fn pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// True exactly once per armed deadline, when it has elapsed.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drop any pending deadline (used when an explicit save already
    /// wrote the current state).
    pub fn disarm(&mut self) {
        self.deadline = None;
    }
}
