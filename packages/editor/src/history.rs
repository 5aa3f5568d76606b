//! # Undo/Redo History
//!
//! Snapshot history over whole component trees.
//!
//! ## Design
//!
//! - The stack always holds at least one entry (the tree as loaded)
//! - `cursor` points at the entry matching the live tree
//! - Pushing truncates everything after the cursor (new edits discard redo)
//! - Undo/redo only move the cursor; entries are never rewritten except for
//!   the selection remembered when the cursor leaves them
//! - History is per (page, language): switching either one resets it
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut history = History::new(tree.clone());
//! history.push(edited_tree, None);
//!
//! let previous = history.undo(None).map(|entry| entry.tree.clone());
//! let again = history.redo(None).map(|entry| entry.tree.clone());
//! ```

use crate::model::ComponentTree;

/// One recorded tree state
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub tree: ComponentTree,

    /// Selection in effect when the cursor last left this entry
    pub selection: Option<String>,
}

#[derive(Debug)]
pub struct History {
    stack: Vec<HistoryEntry>,
    cursor: usize,

    /// Maximum number of entries kept (0 = unlimited)
    max_levels: usize,
}

impl History {
    /// Create a history seeded with `initial`, keeping up to 100 entries
    pub fn new(initial: ComponentTree) -> Self {
        Self::with_max_levels(initial, 100)
    }

    pub fn with_max_levels(initial: ComponentTree, max_levels: usize) -> Self {
        Self {
            stack: vec![HistoryEntry {
                tree: initial,
                selection: None,
            }],
            cursor: 0,
            max_levels,
        }
    }

    /// Drop every entry and start over from `tree`
    pub fn reset(&mut self, tree: ComponentTree) {
        self.stack.clear();
        self.stack.push(HistoryEntry {
            tree,
            selection: None,
        });
        self.cursor = 0;
    }

    /// Record `tree` as the newest state, discarding any redo branch
    pub fn push(&mut self, tree: ComponentTree, outgoing_selection: Option<String>) {
        self.stack[self.cursor].selection = outgoing_selection;
        self.stack.truncate(self.cursor + 1);
        self.stack.push(HistoryEntry {
            tree,
            selection: None,
        });

        // Trim if exceeded max levels
        if self.max_levels > 0 && self.stack.len() > self.max_levels {
            let excess = self.stack.len() - self.max_levels;
            self.stack.drain(..excess);
        }

        self.cursor = self.stack.len() - 1;
    }

    /// Step back one entry; `None` when already at the oldest state
    pub fn undo(&mut self, outgoing_selection: Option<String>) -> Option<&HistoryEntry> {
        if self.cursor == 0 {
            return None;
        }

        self.stack[self.cursor].selection = outgoing_selection;
        self.cursor -= 1;
        Some(&self.stack[self.cursor])
    }

    /// Step forward one entry; `None` when already at the newest state
    pub fn redo(&mut self, outgoing_selection: Option<String>) -> Option<&HistoryEntry> {
        if self.cursor + 1 >= self.stack.len() {
            return None;
        }

        self.stack[self.cursor].selection = outgoing_selection;
        self.cursor += 1;
        Some(&self.stack[self.cursor])
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.stack.len()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> &HistoryEntry {
        &self.stack[self.cursor]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ComponentNode;

    fn tree(ids: &[&str]) -> ComponentTree {
        ids.iter().map(|id| ComponentNode::new(*id, "text", *id)).collect()
    }

    #[test]
    fn test_history_creation() {
        let history = History::new(tree(&["a"]));
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), 0);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_redo_round_trip() {
        let mut history = History::new(tree(&["a"]));
        history.push(tree(&["a", "b"]), None);

        let undone = history.undo(None).unwrap().tree.clone();
        assert_eq!(undone, tree(&["a"]));
        assert!(history.can_redo());

        let redone = history.redo(None).unwrap().tree.clone();
        assert_eq!(redone, tree(&["a", "b"]));
        assert!(history.redo(None).is_none());
    }

    #[test]
    fn test_boundaries_are_noops() {
        let mut history = History::new(tree(&["a"]));
        assert!(history.undo(None).is_none());
        assert!(history.redo(None).is_none());
        assert_eq!(history.cursor(), 0);
    }

    #[test]
    fn test_push_discards_redo_branch() {
        let mut history = History::new(tree(&[]));
        history.push(tree(&["a"]), None);
        history.push(tree(&["a", "b"]), None);
        history.undo(None);
        history.undo(None);

        history.push(tree(&["c"]), None);

        assert_eq!(history.len(), 2);
        assert_eq!(history.cursor(), 1);
        assert!(!history.can_redo());
        assert_eq!(history.current().tree, tree(&["c"]));
    }

    #[test]
    fn test_selection_remembered_when_leaving_entry() {
        let mut history = History::new(tree(&["a"]));
        history.push(tree(&["a", "b"]), Some("a".into()));

        let entry = history.undo(Some("b".into())).unwrap();
        assert_eq!(entry.selection.as_deref(), Some("a"));

        let entry = history.redo(Some("a".into())).unwrap();
        assert_eq!(entry.selection.as_deref(), Some("b"));
    }

    #[test]
    fn test_max_levels_enforced() {
        let mut history = History::with_max_levels(tree(&[]), 3);
        for i in 0..5 {
            let id = format!("n{}", i);
            history.push(tree(&[id.as_str()]), None);
        }

        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), 2);
        assert_eq!(history.current().tree, tree(&["n4"]));
    }

    #[test]
    fn test_reset() {
        let mut history = History::new(tree(&["a"]));
        history.push(tree(&["a", "b"]), None);
        history.push(tree(&["a", "b", "c"]), None);

        history.reset(tree(&["x"]));
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), 0);
        assert_eq!(history.current().tree, tree(&["x"]));
    }
}
