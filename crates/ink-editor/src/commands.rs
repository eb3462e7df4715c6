//! Undo/redo over the stroke list.
//!
//! Mutations replace the whole list (value semantics), so history is
//! snapshot-based: each command holds the list before and after. Drag
//! gestures batch — the snapshot is taken when the finger goes down and
//! compared when it lifts, so a continuous erase that removes five
//! strokes undoes in one step.

use ink_core::model::StrokeRecord;

#[derive(Debug, Clone)]
struct Command {
    before: Vec<StrokeRecord>,
    after: Vec<StrokeRecord>,
    description: String,
}

pub struct CommandStack {
    undo_stack: Vec<Command>,
    redo_stack: Vec<Command>,
    max_depth: usize,
    /// Batch nesting depth (0 = not batching).
    batch_depth: usize,
    /// List captured at the start of the current batch.
    batch_snapshot: Option<Vec<StrokeRecord>>,
}

impl CommandStack {
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_depth,
            batch_depth: 0,
            batch_snapshot: None,
        }
    }

    /// Start a batch group, capturing `current` as the undo snapshot.
    /// Everything until `end_batch` becomes one atomic undo step.
    pub fn begin_batch(&mut self, current: &[StrokeRecord]) {
        if self.batch_depth == 0 {
            self.batch_snapshot = Some(current.to_vec());
        }
        self.batch_depth += 1;
    }

    /// Close a batch group. When the outermost batch closes and the list
    /// actually changed, push one command covering the whole gesture.
    pub fn end_batch(&mut self, current: &[StrokeRecord], description: &str) {
        if self.batch_depth == 0 {
            return;
        }
        self.batch_depth -= 1;
        if self.batch_depth == 0
            && let Some(before) = self.batch_snapshot.take()
            && before != current
        {
            self.push(Command {
                before,
                after: current.to_vec(),
                description: description.to_string(),
            });
        }
    }

    /// Record a non-batched mutation (e.g. an explicit clear).
    /// Ignored inside a batch — the batch snapshot covers it.
    pub fn record(&mut self, before: &[StrokeRecord], after: &[StrokeRecord], description: &str) {
        if self.batch_depth > 0 {
            return;
        }
        self.push(Command {
            before: before.to_vec(),
            after: after.to_vec(),
            description: description.to_string(),
        });
    }

    fn push(&mut self, cmd: Command) {
        self.undo_stack.push(cmd);
        if self.undo_stack.len() > self.max_depth {
            self.undo_stack.remove(0);
        }
        // New action invalidates the redo branch.
        self.redo_stack.clear();
    }

    /// Pop one undo step; returns the list to restore and its label.
    pub fn undo(&mut self) -> Option<(Vec<StrokeRecord>, String)> {
        let cmd = self.undo_stack.pop()?;
        let restore = cmd.before.clone();
        let description = cmd.description.clone();
        self.redo_stack.push(cmd);
        Some((restore, description))
    }

    pub fn redo(&mut self) -> Option<(Vec<StrokeRecord>, String)> {
        let cmd = self.redo_stack.pop()?;
        let restore = cmd.after.clone();
        let description = cmd.description.clone();
        self.undo_stack.push(cmd);
        Some((restore, description))
    }

    pub fn batch_open(&self) -> bool {
        self.batch_depth > 0
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ink_core::id::StrokeId;
    use ink_core::model::Color;
    use pretty_assertions::assert_eq;

    fn stroke(data: &str) -> StrokeRecord {
        StrokeRecord {
            id: StrokeId::fresh(),
            data: data.into(),
            color: Color::BLACK,
            width: 1.0,
        }
    }

    #[test]
    fn undo_restores_previous_list() {
        let mut stack = CommandStack::new(10);
        let before = vec![stroke("M0.0,0.0 L1.0,1.0")];
        let mut after = before.clone();
        after.push(stroke("M5.0,5.0 L6.0,6.0"));

        stack.record(&before, &after, "draw");
        let (restored, desc) = stack.undo().unwrap();
        assert_eq!(restored, before);
        assert_eq!(desc, "draw");
        assert!(stack.can_redo());
    }

    #[test]
    fn empty_batch_pushes_nothing() {
        let mut stack = CommandStack::new(10);
        let list = vec![stroke("M0.0,0.0 L1.0,1.0")];
        stack.begin_batch(&list);
        stack.end_batch(&list, "gesture");
        assert!(!stack.can_undo());
    }

    #[test]
    fn batch_collapses_to_single_step() {
        let mut stack = CommandStack::new(10);
        let start = vec![stroke("M0.0,0.0 L1.0,1.0"), stroke("M2.0,2.0 L3.0,3.0")];

        // Several erase samples land between begin and end; only the
        // net effect is recorded.
        stack.begin_batch(&start);
        let end: Vec<StrokeRecord> = Vec::new();
        stack.end_batch(&end, "erase");

        let (restored, _) = stack.undo().unwrap();
        assert_eq!(restored, start);
        assert!(!stack.can_undo());
    }

    #[test]
    fn depth_cap_trims_oldest() {
        let mut stack = CommandStack::new(3);
        let empty: Vec<StrokeRecord> = Vec::new();
        for i in 0..5 {
            let after = vec![stroke(&format!("M{i}.0,0.0 L1.0,1.0"))];
            stack.record(&empty, &after, "draw");
        }
        let mut undone = 0;
        while stack.undo().is_some() {
            undone += 1;
        }
        assert_eq!(undone, 3);
    }

    #[test]
    fn new_action_clears_redo() {
        let mut stack = CommandStack::new(10);
        let empty: Vec<StrokeRecord> = Vec::new();
        let one = vec![stroke("M0.0,0.0 L1.0,1.0")];

        stack.record(&empty, &one, "draw");
        stack.undo().unwrap();
        assert!(stack.can_redo());

        stack.record(&empty, &one, "draw again");
        assert!(!stack.can_redo());
    }
}
