//! # Pagecraft Editor
//!
//! Editing engine for the page builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: Element tree, styles, templates      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: session lifecycle + mutations       │
//! │  - Pure tree operations                     │
//! │  - Snapshot undo/redo history               │
//! │  - Versions through a DocumentStore         │
//! │  - Topic-scoped change events               │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ renderer: tree → VDOM → HTML                │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Tree is source of truth**: rendered output is a derived view
//! 2. **Operations are pure**: every mutation returns a new tree
//! 3. **History holds snapshots**: undo never re-derives state
//! 4. **Persistence is fallible**: a failed save never loses the live tree
//!
//! ## Usage
//!
//! ```rust
//! use pagecraft_editor::{BuilderConfig, BuilderSession, MemoryStore};
//! use std::sync::Arc;
//!
//! let mut session = BuilderSession::new(
//!     "home",
//!     Vec::new(),
//!     Arc::new(MemoryStore::new()),
//!     BuilderConfig::default(),
//! );
//!
//! let section = session.add_from_palette("Section", None).unwrap().unwrap();
//! session.add_from_palette("Heading", Some(&section)).unwrap();
//! assert_eq!(session.tree()[0].children.len(), 1);
//!
//! session.undo().unwrap();
//! assert!(session.tree()[0].children.is_empty());
//! ```

pub mod config;
mod errors;
pub mod events;
mod file_store;
pub mod history;
pub mod mutations;
mod persist;
mod session;
mod store;

pub use config::{BuilderConfig, ConfigError};
pub use errors::EditorError;
pub use events::{BuilderEvent, EventHub, Topic};
pub use file_store::JsonFileStore;
pub use history::{History, HistoryEntry};
pub use mutations::{AnimationPatch, ElementPatch, Mutation, MutationError, UpdateScope};
pub use persist::{BusyFlag, CancelHandle, PersistError, PersistOp};
pub use session::{BuilderMode, BuilderSession, Controls, Notice, NoticeLevel};
pub use store::{parse_version_id, version_id, DocumentStore, MemoryStore, StoreError, VersionSnapshot};
