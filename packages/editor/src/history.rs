//! # History
//!
//! Linear undo/redo over editor snapshots.
//!
//! ## Design
//!
//! - `entries[current_index]` is "now"; entries after it are the redo tail
//! - Recording a snapshot drops the redo tail, then appends
//! - Undo/redo only move the pointer and are no-ops at either end
//! - The oldest entries are dropped once `max_entries` is exceeded

use serde::Serialize;

use crate::state::Snapshot;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct History {
    #[serde(rename = "history")]
    entries: Vec<Snapshot>,

    current_index: usize,

    /// Maximum number of snapshots kept (0 = unlimited)
    #[serde(skip)]
    max_entries: usize,
}

impl History {
    pub fn new(initial: Snapshot, max_entries: usize) -> Self {
        Self {
            entries: vec![initial],
            current_index: 0,
            max_entries,
        }
    }

    /// Record a new "now", discarding anything that could have been redone.
    pub fn record(&mut self, snapshot: Snapshot) {
        self.entries.truncate(self.current_index + 1);
        self.entries.push(snapshot);

        if self.max_entries > 0 && self.entries.len() > self.max_entries {
            let excess = self.entries.len() - self.max_entries;
            self.entries.drain(..excess);
        }

        self.current_index = self.entries.len() - 1;
    }

    /// Step back. Returns the snapshot that is now current.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if !self.can_undo() {
            return None;
        }
        self.current_index -= 1;
        self.entries.get(self.current_index)
    }

    /// Step forward. Returns the snapshot that is now current.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        if !self.can_redo() {
            return None;
        }
        self.current_index += 1;
        self.entries.get(self.current_index)
    }

    /// Forget everything and start over from `initial`.
    pub fn reset(&mut self, initial: Snapshot) {
        self.entries.clear();
        self.entries.push(initial);
        self.current_index = 0;
    }

    pub fn can_undo(&self) -> bool {
        self.current_index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.current_index + 1 < self.entries.len()
    }

    pub fn undo_levels(&self) -> usize {
        self.current_index
    }

    pub fn redo_levels(&self) -> usize {
        self.entries.len() - 1 - self.current_index
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn current(&self) -> Option<&Snapshot> {
        self.entries.get(self.current_index)
    }

    pub fn entries(&self) -> &[Snapshot] {
        &self.entries
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use funnel_model::{empty_document, Element};

    fn snapshot(page: &str) -> Snapshot {
        Snapshot {
            elements: empty_document(),
            selected_element: Element::none(),
            funnel_page_id: page.to_string(),
        }
    }

    fn page_of(history: &History) -> &str {
        &history.current().unwrap().funnel_page_id
    }

    #[test]
    fn test_history_creation() {
        let history = History::new(snapshot("0"), 0);
        assert_eq!(history.len(), 1);
        assert_eq!(history.current_index(), 0);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_record_undo_redo() {
        let mut history = History::new(snapshot("0"), 0);
        history.record(snapshot("1"));
        history.record(snapshot("2"));

        assert_eq!(history.undo().map(|s| s.funnel_page_id.as_str()), Some("1"));
        assert_eq!(history.undo().map(|s| s.funnel_page_id.as_str()), Some("0"));
        assert!(history.undo().is_none());
        assert_eq!(page_of(&history), "0");

        assert_eq!(history.redo().map(|s| s.funnel_page_id.as_str()), Some("1"));
        assert_eq!(history.redo().map(|s| s.funnel_page_id.as_str()), Some("2"));
        assert!(history.redo().is_none());
        assert_eq!(page_of(&history), "2");
    }

    #[test]
    fn test_record_after_undo_drops_redo_tail() {
        let mut history = History::new(snapshot("0"), 0);
        history.record(snapshot("1"));
        history.record(snapshot("2"));
        history.undo();

        history.record(snapshot("3"));

        assert_eq!(history.len(), 3);
        assert_eq!(history.redo_levels(), 0);
        assert_eq!(history.undo_levels(), 2);
        assert_eq!(history.undo().map(|s| s.funnel_page_id.as_str()), Some("1"));
    }

    #[test]
    fn test_max_entries_enforced() {
        let mut history = History::new(snapshot("0"), 2);
        for i in 1..=3 {
            history.record(snapshot(&i.to_string()));
        }

        assert_eq!(history.len(), 2);
        assert_eq!(history.current_index(), 1);
        assert_eq!(page_of(&history), "3");
        assert_eq!(history.undo().map(|s| s.funnel_page_id.as_str()), Some("2"));
        assert!(!history.can_undo());
    }

    #[test]
    fn test_reset() {
        let mut history = History::new(snapshot("0"), 0);
        history.record(snapshot("1"));
        history.reset(snapshot("fresh"));

        assert_eq!(history.len(), 1);
        assert_eq!(page_of(&history), "fresh");
    }

    #[test]
    fn test_serialized_shape() {
        let history = History::new(snapshot("0"), 5);
        let value = serde_json::to_value(&history).unwrap();
        assert_eq!(value["currentIndex"], 0);
        assert_eq!(value["history"].as_array().map(Vec::len), Some(1));
    }
}
