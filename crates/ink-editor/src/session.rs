//! The canvas session: what a note editor screen mounts.
//!
//! Owns the gesture router, tool state, undo history and autosave
//! schedule for one open note. The stroke list is treated as a snapshot
//! the host handed over: every mutation builds a *new* list and reports
//! it through the change callback; the session never edits a list in
//! place, so the host's last-rendered frame can never alias a list
//! being mutated mid-erase.

use crate::autosave::Autosave;
use crate::commands::CommandStack;
use crate::gesture::{CanvasAction, GestureRouter};
use crate::input::{TouchEvent, TouchPhase};
use crate::persist::{NotePersistence, PersistError};
use crate::tools::{ToolKind, ToolState};
use ink_core::config::EngineConfig;
use ink_core::id::StrokeId;
use ink_core::model::{Color, Note, StrokeRecord};
use ink_core::transform::CanvasTransform;
use ink_render::paint::{Frame, LiveStroke, build_frame};
use std::time::Instant;

const UNDO_DEPTH: usize = 100;
const GESTURE_LABEL: &str = "canvas edit";

/// Invoked with the full replacement stroke list after every committed
/// change (stroke added, strokes erased, canvas cleared, undo/redo).
pub type ChangeCallback = Box<dyn FnMut(&[StrokeRecord])>;

pub struct CanvasSession {
    config: EngineConfig,
    note: Note,
    tool: ToolState,
    router: GestureRouter,
    commands: CommandStack,
    autosave: Autosave,
    persistence: Box<dyn NotePersistence>,
    on_change: ChangeCallback,
}

impl CanvasSession {
    /// Mount a note. Malformed strokes are filtered here so one corrupt
    /// record never blocks the rest of the note from rendering.
    pub fn new(
        mut note: Note,
        config: EngineConfig,
        persistence: Box<dyn NotePersistence>,
        on_change: ChangeCallback,
    ) -> Self {
        let dropped = note.sanitize();
        if dropped > 0 {
            log::warn!("mount: dropped {dropped} malformed strokes from {:?}", note.title);
        }

        Self {
            tool: ToolState::new(&config),
            router: GestureRouter::new(&config),
            commands: CommandStack::new(UNDO_DEPTH),
            autosave: Autosave::new(config.autosave_debounce_ms),
            persistence,
            on_change,
            config,
            note,
        }
    }

    // ─── State access ────────────────────────────────────────────────────

    pub fn strokes(&self) -> &[StrokeRecord] {
        &self.note.strokes
    }

    pub fn note(&self) -> &Note {
        &self.note
    }

    pub fn transform(&self) -> &CanvasTransform {
        self.router.transform()
    }

    pub fn tool(&self) -> &ToolState {
        &self.tool
    }

    /// Adopt a replacement list from the host. The handed-in list is the
    /// source of truth for the next render.
    pub fn set_strokes(&mut self, strokes: Vec<StrokeRecord>) {
        for stroke in &strokes {
            stroke.id.observe();
        }
        self.note.strokes = strokes;
    }

    // ─── Tool changes ────────────────────────────────────────────────────

    pub fn set_tool(&mut self, kind: ToolKind) {
        if self.tool.kind != kind {
            // Mode switches mid-gesture discard the gesture.
            self.router.interrupt();
            self.tool.kind = kind;
        }
    }

    /// Affects future strokes only; committed strokes keep their color.
    pub fn set_color(&mut self, color: Color) {
        self.tool.color = color;
    }

    pub fn set_width(&mut self, width: f32) {
        self.tool.width = width;
    }

    // ─── Input ───────────────────────────────────────────────────────────

    /// Route one touch frame through the gesture router and apply the
    /// resulting stroke-list mutations.
    pub fn handle_touch(&mut self, event: &TouchEvent, now: Instant) {
        if event.phase == TouchPhase::Start {
            self.commands.begin_batch(&self.note.strokes);
        }

        for action in self.router.handle(event, &self.tool) {
            match action {
                CanvasAction::CommitStroke { data } => {
                    let record = StrokeRecord {
                        id: StrokeId::fresh(),
                        data,
                        color: self.tool.color,
                        width: self.tool.width,
                    };
                    log::debug!("commit stroke {}", record.id);
                    let mut next = self.note.strokes.clone();
                    next.push(record);
                    self.replace(next, now);
                }

                CanvasAction::EraseAt { center, radius } => {
                    let hit = ink_render::hit::strokes_hit(&self.note.strokes, center, radius);
                    if !hit.is_empty() {
                        log::debug!("erase {} strokes at {center}", hit.len());
                        let next: Vec<StrokeRecord> = self
                            .note
                            .strokes
                            .iter()
                            .filter(|stroke| !hit.contains(&stroke.id))
                            .cloned()
                            .collect();
                        self.replace(next, now);
                    }
                }
            }
        }

        if matches!(event.phase, TouchPhase::End | TouchPhase::Cancel) && event.touches.is_empty() {
            while self.commands.batch_open() {
                self.commands.end_batch(&self.note.strokes, GESTURE_LABEL);
            }
        }
    }

    /// Host-side interruption (system dialog, app backgrounded):
    /// discards the in-progress gesture without committing.
    pub fn interrupt(&mut self) {
        self.router.interrupt();
        while self.commands.batch_open() {
            self.commands.end_batch(&self.note.strokes, GESTURE_LABEL);
        }
    }

    // ─── Explicit mutations ──────────────────────────────────────────────

    /// Empty the canvas. A second clear on an already-empty canvas is a
    /// no-op: no callback, no undo entry, no save.
    pub fn clear(&mut self, now: Instant) {
        if self.note.strokes.is_empty() {
            return;
        }
        let before = self.note.strokes.clone();
        self.replace(Vec::new(), now);
        self.commands.record(&before, &self.note.strokes, "clear canvas");
    }

    pub fn undo(&mut self, now: Instant) -> bool {
        match self.commands.undo() {
            Some((restore, description)) => {
                log::debug!("undo {description}");
                self.replace(restore, now);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self, now: Instant) -> bool {
        match self.commands.redo() {
            Some((restore, description)) => {
                log::debug!("redo {description}");
                self.replace(restore, now);
                true
            }
            None => false,
        }
    }

    fn replace(&mut self, next: Vec<StrokeRecord>, now: Instant) {
        self.note.strokes = next;
        (self.on_change)(&self.note.strokes);
        self.autosave.mark_dirty(now);
    }

    // ─── Rendering ───────────────────────────────────────────────────────

    /// Build the frame for the current state. Failures come back as a
    /// placeholder frame instead of an error: the note data is intact,
    /// so the next rebuild can succeed.
    pub fn frame(&self, viewport: (f32, f32)) -> Frame {
        let preview = self.router.live_preview();
        let live = preview.as_ref().map(|cmds| LiveStroke {
            cmds: cmds.as_slice(),
            color: self.tool.color,
            width: self.tool.width,
        });

        let eraser = match (self.router.is_erasing(), self.router.last_touch()) {
            (true, Some(touch)) => Some((touch, self.tool.eraser_radius)),
            _ => None,
        };

        match build_frame(
            self.router.transform(),
            viewport,
            self.note.template,
            self.config.template_spacing,
            &self.note.strokes,
            live,
            eraser,
        ) {
            Ok(frame) => frame,
            Err(err) => {
                log::error!("frame build failed: {err}");
                Frame::placeholder("Canvas is unavailable. Your note is safe.")
            }
        }
    }

    // ─── Persistence ─────────────────────────────────────────────────────

    /// Poll the autosave schedule. Call at the host's frame or event
    /// cadence; saves at most once per armed deadline. Background save
    /// failures are logged and swallowed — state is cumulative, so the
    /// next successful save catches up.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.autosave.take_due(now) {
            return false;
        }
        match self.persistence.save(&self.note) {
            Ok(()) => {
                log::debug!("autosaved {:?}", self.note.title);
                true
            }
            Err(err) => {
                log::warn!("autosave failed: {err}");
                false
            }
        }
    }

    /// User-initiated save: propagates the error so the host can show it.
    pub fn save_now(&mut self) -> Result<(), PersistError> {
        self.autosave.disarm();
        self.persistence.save(&self.note)
    }
}
