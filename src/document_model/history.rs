use super::element::MarkdownElement;
use tracing::trace;

pub const DEFAULT_MAX_HISTORY: usize = 50;

/// A full copy of the document's element sequence.
pub type Snapshot = Vec<MarkdownElement>;

/// Bounded undo/redo history of whole-document snapshots.
///
/// The top of `undo_stack` always mirrors the document's current elements,
/// so the stack holds at least one entry once a document is loaded and
/// `undo` never removes the last one.
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    max_undo_levels: usize,
}

impl History {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_MAX_HISTORY)
    }

    pub fn with_limit(max_undo_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_undo_levels: max_undo_levels.max(1),
        }
    }

    /// Record the state reached by a new edit. Clears the redo stack.
    pub fn push(&mut self, snapshot: Snapshot) {
        self.undo_stack.push(snapshot);
        self.redo_stack.clear();
        self.trim();
    }

    /// Step back. Returns the snapshot to restore, or `None` if only the
    /// current state is left.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if self.undo_stack.len() <= 1 {
            return None;
        }

        let current = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        trace!(
            undo = self.undo_stack.len(),
            redo = self.redo_stack.len(),
            "history stepped back"
        );
        self.undo_stack.last()
    }

    /// Step forward again after an undo.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(next);
        self.trim();
        trace!(
            undo = self.undo_stack.len(),
            redo = self.redo_stack.len(),
            "history stepped forward"
        );
        self.undo_stack.last()
    }

    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.undo_stack.is_empty()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn max_undo_levels(&self) -> usize {
        self.max_undo_levels
    }

    pub fn set_max_undo_levels(&mut self, max_undo_levels: usize) {
        self.max_undo_levels = max_undo_levels.max(1);
        self.trim();
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    // Oldest snapshots go first.
    fn trim(&mut self) {
        if self.undo_stack.len() > self.max_undo_levels {
            let excess = self.undo_stack.len() - self.max_undo_levels;
            self.undo_stack.drain(..excess);
            trace!(dropped = excess, "history trimmed");
        }
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(text: &str) -> Snapshot {
        vec![MarkdownElement::new(text)]
    }

    #[test]
    fn test_single_entry_cannot_undo() {
        let mut history = History::new();
        history.push(snap("loaded"));

        assert!(!history.can_undo());
        assert!(history.undo().is_none());
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_undo_then_redo() {
        let mut history = History::new();
        history.push(snap("a"));
        history.push(snap("b"));

        assert_eq!(history.undo(), Some(&snap("a")));
        assert!(history.can_redo());
        assert_eq!(history.redo(), Some(&snap("b")));
        assert!(!history.can_redo());
    }

    #[test]
    fn test_push_clears_redo() {
        let mut history = History::new();
        history.push(snap("a"));
        history.push(snap("b"));
        history.undo();

        history.push(snap("c"));
        assert!(!history.can_redo());
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_limit_discards_oldest() {
        let mut history = History::with_limit(3);
        for text in ["1", "2", "3", "4", "5"] {
            history.push(snap(text));
        }

        assert_eq!(history.len(), 3);
        assert_eq!(history.undo(), Some(&snap("4")));
        assert_eq!(history.undo(), Some(&snap("3")));
        assert!(history.undo().is_none());
    }

    #[test]
    fn test_shrinking_limit_trims() {
        let mut history = History::new();
        for text in ["1", "2", "3", "4"] {
            history.push(snap(text));
        }

        history.set_max_undo_levels(2);
        assert_eq!(history.len(), 2);
        assert_eq!(history.max_undo_levels(), 2);
    }
}
