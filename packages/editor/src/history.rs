//! # Undo/Redo History
//!
//! Linear log of full-tree snapshots with a pointer to the live entry.
//!
//! ## Design
//!
//! - Each commit stores a deep copy of the tree and a description
//! - Undo/redo move the pointer and hand back a deep copy of that entry
//! - Committing after an undo discards every entry past the pointer
//! - The log is capped (100 entries by default); the oldest entries go first
//! - Gestures (slider drags, nudges) coalesce their commits into one entry
//!
//! Snapshots never alias the live tree, so editing the tree returned by
//! [`History::undo`] cannot corrupt the log.
//!
//! ## Example
//!
//! ```rust
//! use pagecraft_editor::History;
//! use pagecraft_model::{Element, ElementKind};
//!
//! let mut history = History::new(&[]);
//! let tree = vec![Element::new("s", ElementKind::Section, "Section")];
//! history.commit("Added Section", &tree);
//!
//! assert_eq!(history.undo(), Some(vec![]));
//! assert_eq!(history.redo(), Some(tree));
//! ```

use pagecraft_model::Element;
use tracing::debug;

/// Default number of retained entries
pub const DEFAULT_CAPACITY: usize = 100;

/// Description of the entry every history starts with
pub const INITIAL_DESCRIPTION: &str = "Initial State";

/// One committed state of the page
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub description: String,
    pub snapshot: Vec<Element>,
}

#[derive(Debug, Clone)]
struct Gesture {
    description: String,
    /// Set once the gesture has produced its entry
    committed: bool,
}

/// Undo/redo log for one page
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<HistoryEntry>,

    /// Index of the live entry
    pointer: usize,

    /// Maximum number of entries kept
    capacity: usize,

    /// Currently coalescing commits
    gesture: Option<Gesture>,
}

impl History {
    /// Start a history with `tree` as the initial state
    pub fn new(tree: &[Element]) -> Self {
        Self::with_capacity(tree, DEFAULT_CAPACITY)
    }

    /// Create a history with a custom capacity (at least 1)
    pub fn with_capacity(tree: &[Element], capacity: usize) -> Self {
        Self {
            entries: vec![HistoryEntry {
                description: INITIAL_DESCRIPTION.to_string(),
                snapshot: tree.to_vec(),
            }],
            pointer: 0,
            capacity: capacity.max(1),
            gesture: None,
        }
    }

    /// Record `tree` as the new live state
    pub fn commit(&mut self, description: impl Into<String>, tree: &[Element]) {
        if let Some(gesture) = &mut self.gesture {
            if gesture.committed && self.pointer + 1 == self.entries.len() {
                self.entries[self.pointer].snapshot = tree.to_vec();
                debug!(description = %gesture.description, "Coalesced commit into gesture");
                return;
            }
            gesture.committed = true;
        }

        let description = match &self.gesture {
            Some(gesture) => gesture.description.clone(),
            None => description.into(),
        };

        // New action invalidates the future
        self.entries.truncate(self.pointer + 1);
        self.entries.push(HistoryEntry {
            description,
            snapshot: tree.to_vec(),
        });

        if self.entries.len() > self.capacity {
            let overflow = self.entries.len() - self.capacity;
            self.entries.drain(..overflow);
        }

        self.pointer = self.entries.len() - 1;
        debug!(
            pointer = self.pointer,
            entries = self.entries.len(),
            description = %self.entries[self.pointer].description,
            "Committed history entry"
        );
    }

    /// Step back. `None` when already at the oldest entry.
    pub fn undo(&mut self) -> Option<Vec<Element>> {
        self.gesture = None;
        if self.pointer == 0 {
            return None;
        }
        self.pointer -= 1;
        debug!(pointer = self.pointer, "Undo");
        Some(self.entries[self.pointer].snapshot.clone())
    }

    /// Step forward. `None` when already at the newest entry.
    pub fn redo(&mut self) -> Option<Vec<Element>> {
        self.gesture = None;
        if self.pointer + 1 >= self.entries.len() {
            return None;
        }
        self.pointer += 1;
        debug!(pointer = self.pointer, "Redo");
        Some(self.entries[self.pointer].snapshot.clone())
    }

    /// Jump to an arbitrary entry. `None` for an out-of-range index.
    pub fn jump_to(&mut self, index: usize) -> Option<Vec<Element>> {
        if index >= self.entries.len() {
            return None;
        }
        self.gesture = None;
        self.pointer = index;
        debug!(pointer = self.pointer, "Jumped to history entry");
        Some(self.entries[self.pointer].snapshot.clone())
    }

    /// Start coalescing: until [`History::end_gesture`], all commits share one
    /// entry labelled `description`
    pub fn begin_gesture(&mut self, description: impl Into<String>) {
        self.gesture = Some(Gesture {
            description: description.into(),
            committed: false,
        });
    }

    pub fn end_gesture(&mut self) {
        self.gesture = None;
    }

    pub fn in_gesture(&self) -> bool {
        self.gesture.is_some()
    }

    /// Snapshot the pointer designates
    pub fn current(&self) -> &[Element] {
        &self.entries[self.pointer].snapshot
    }

    pub fn current_entry(&self) -> &HistoryEntry {
        &self.entries[self.pointer]
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn pointer(&self) -> usize {
        self.pointer
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn can_undo(&self) -> bool {
        self.pointer > 0
    }

    pub fn can_redo(&self) -> bool {
        self.pointer + 1 < self.entries.len()
    }

    /// Description of the action the next undo reverts
    pub fn undo_description(&self) -> Option<&str> {
        if self.can_undo() {
            Some(&self.entries[self.pointer].description)
        } else {
            None
        }
    }

    /// Description of the action the next redo reapplies
    pub fn redo_description(&self) -> Option<&str> {
        self.entries
            .get(self.pointer + 1)
            .map(|entry| entry.description.as_str())
    }

    /// Drop everything and start over from `tree`
    pub fn reset(&mut self, tree: &[Element]) {
        *self = Self::with_capacity(tree, self.capacity);
    }
}
