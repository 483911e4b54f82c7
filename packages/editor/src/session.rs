//! # Builder Session
//!
//! One open page in the builder: the live tree, its undo history, the
//! active breakpoint and mode, the selection, and the store it persists to.
//!
//! ```text
//!   UI gesture ──► BuilderSession ──► Mutation::apply ──► new tree
//!                       │                                    │
//!                       │         (unchanged? stop here)     │
//!                       ▼                                    ▼
//!                   EventHub ◄──────────────────────── History::commit
//!                       │
//!                       ▼
//!              views re-render (renderer)
//! ```
//!
//! ## Modes
//!
//! - `Editing`: full editing affordances
//! - `Previewing`: render-only flag, the tree is untouched
//! - `PreviewingVersion`: the live tree is temporarily replaced by a saved
//!   version. Mutations and undo/redo are refused until the preview is
//!   restored (which commits it) or cancelled (which reverts to the
//!   history's current entry). Previewing never writes to history.
//!
//! ## Persistence
//!
//! Store calls go through [`crate::persist`]: timed out, cancellable, and
//! serialized by a busy flag. A failed call leaves the in-memory tree as it
//! was and pushes a [`Notice`] for the UI.
//!
//! A page whose load failed is not saved over: [`BuilderSession::save_page`]
//! and [`BuilderSession::autosave`] refuse until a load succeeds
//! ([`BuilderSession::reload`]) or the user chooses
//! [`BuilderSession::overwrite_page`].
//!
//! ## Ids
//!
//! Element ids are unique across the tree. Trees handed to the session are
//! repaired on the way in: later duplicates get fresh ids and a notice.

use crate::config::BuilderConfig;
use crate::events::{BuilderEvent, EventHub, Topic};
use crate::history::History;
use crate::mutations::{self, Mutation, UpdateScope};
use crate::persist::{guarded, BusyFlag, CancelHandle, PersistError, PersistOp};
use crate::store::{DocumentStore, VersionSnapshot};
use crate::EditorError;
use pagecraft_model::{
    clone_with_fresh_ids, find_template, Breakpoint, Element, ElementTemplate, IdGenerator,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum BuilderMode {
    #[default]
    Editing,
    Previewing,
    #[serde(rename_all = "camelCase")]
    PreviewingVersion { version_id: String, name: String },
}

impl BuilderMode {
    pub fn is_preview(&self) -> bool {
        !matches!(self, BuilderMode::Editing)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// User-facing message, e.g. a failed save
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Which toolbar controls are enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Controls {
    pub can_edit: bool,
    pub can_undo: bool,
    pub can_redo: bool,
    pub can_save: bool,
    pub can_restore: bool,
    pub can_cancel_preview: bool,
    pub busy: bool,
}

pub struct BuilderSession {
    page_id: String,
    tree: Vec<Element>,
    history: History,
    ids: IdGenerator,
    breakpoint: Breakpoint,
    mode: BuilderMode,
    /// Version whose tree is shown while `mode` is `PreviewingVersion`
    previewing: Option<VersionSnapshot>,
    selected: Option<String>,
    /// Newest first, as last listed
    versions: Vec<VersionSnapshot>,
    notices: Vec<Notice>,
    dirty: bool,
    /// False after a failed load; the stored page was never read
    loaded: bool,
    store: Arc<dyn DocumentStore>,
    events: EventHub,
    config: BuilderConfig,
    busy: BusyFlag,
    cancel: CancelHandle,
}

impl BuilderSession {
    /// Session over an already-loaded tree
    pub fn new(
        page_id: impl Into<String>,
        tree: Vec<Element>,
        store: Arc<dyn DocumentStore>,
        config: BuilderConfig,
    ) -> Self {
        let page_id = page_id.into();
        let ids = IdGenerator::new(&page_id);
        let history = History::with_capacity(&[], config.history_capacity);

        let mut session = Self {
            page_id,
            tree: Vec::new(),
            history,
            ids,
            breakpoint: config.default_breakpoint,
            mode: BuilderMode::Editing,
            previewing: None,
            selected: None,
            versions: Vec::new(),
            notices: Vec::new(),
            dirty: false,
            loaded: true,
            store,
            events: EventHub::new(),
            config,
            busy: BusyFlag::default(),
            cancel: CancelHandle::default(),
        };
        session.adopt(tree);
        session
    }

    /// Load `page_id` from the store. A failed load opens an empty page and
    /// leaves a notice rather than failing the session.
    #[instrument(skip(store, config))]
    pub async fn open(page_id: &str, store: Arc<dyn DocumentStore>, config: BuilderConfig) -> Self {
        let mut session = Self::new(page_id, Vec::new(), store, config);
        session.loaded = false;
        // Errors are already recorded as notices
        let _ = session.reload().await;
        session
    }

    /// [`Self::open`] with the config file found in `dir`
    pub async fn open_in_dir(
        dir: impl AsRef<Path>,
        page_id: &str,
        store: Arc<dyn DocumentStore>,
    ) -> Result<Self, EditorError> {
        let config = BuilderConfig::load(dir)?;
        Ok(Self::open(page_id, store, config).await)
    }

    /// Read the page from the store, replacing the tree and history.
    /// On failure the session keeps its tree; if the page has never been
    /// read, saves stay refused.
    #[instrument(skip(self), fields(page_id = %self.page_id))]
    pub async fn reload(&mut self) -> Result<(), EditorError> {
        let loaded = guarded(
            PersistOp::LoadDocument,
            &self.busy,
            &self.cancel,
            self.config.persistence_timeout(),
            self.store.load_document(&self.page_id),
        )
        .await;

        match loaded {
            Ok(tree) => {
                info!(roots = tree.len(), "Opened page");
                self.previewing = None;
                self.selected = None;
                self.set_mode(BuilderMode::Editing);
                self.adopt(tree);
                self.loaded = true;
                self.dirty = false;
                self.publish_document_changed("Loaded Page");
                if let Err(e) = self.refresh_versions().await {
                    debug!(error = %e, "Version list unavailable");
                }
                Ok(())
            }
            Err(e) => Err(self.persist_failed_error(e)),
        }
    }

    pub fn page_id(&self) -> &str {
        &self.page_id
    }

    /// The tree to render: the live tree, or the previewed version's
    pub fn tree(&self) -> &[Element] {
        &self.tree
    }

    /// The tree that would be saved; ignores any version preview
    pub fn document(&self) -> &[Element] {
        self.history.current()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn mode(&self) -> &BuilderMode {
        &self.mode
    }

    pub fn breakpoint(&self) -> Breakpoint {
        self.breakpoint
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn versions(&self) -> &[VersionSnapshot] {
        &self.versions
    }

    pub fn previewing_version(&self) -> Option<&VersionSnapshot> {
        self.previewing.as_ref()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Whether the live tree has commits not yet saved
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Whether the stored page was read (or the tree was supplied directly)
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    /// Shared flag for views that outlive a borrow of the session
    pub fn busy_flag(&self) -> BusyFlag {
        self.busy.clone()
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn subscribe(&mut self, topic: Topic) -> mpsc::UnboundedReceiver<BuilderEvent> {
        self.events.subscribe(topic)
    }

    pub fn controls(&self) -> Controls {
        let busy = self.is_busy();
        let in_version = self.previewing.is_some();
        Controls {
            can_edit: !in_version,
            can_undo: !in_version && self.history.can_undo(),
            can_redo: !in_version && self.history.can_redo(),
            can_save: !busy && self.loaded,
            can_restore: in_version && !busy,
            can_cancel_preview: in_version,
            busy,
        }
    }

    // ------------------------------------------------------------------
    // Selection and view state
    // ------------------------------------------------------------------

    /// Select a node (edit mode only). Unknown ids clear the selection.
    pub fn select(&mut self, id: Option<&str>) -> bool {
        if self.mode != BuilderMode::Editing {
            return false;
        }
        self.selected = id
            .filter(|id| mutations::find_element(&self.tree, id).is_some())
            .map(str::to_string);
        true
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_element(&self) -> Option<&Element> {
        self.selected
            .as_deref()
            .and_then(|id| mutations::find_element(&self.tree, id))
    }

    pub fn set_breakpoint(&mut self, breakpoint: Breakpoint) {
        self.breakpoint = breakpoint;
    }

    /// Flip between editing and preview. Not available during a version preview.
    pub fn toggle_preview(&mut self) -> Result<&BuilderMode, EditorError> {
        self.ensure_not_version_preview()?;
        let next = match self.mode {
            BuilderMode::Editing => BuilderMode::Previewing,
            _ => BuilderMode::Editing,
        };
        if next.is_preview() {
            self.selected = None;
        }
        self.set_mode(next);
        Ok(&self.mode)
    }

    // ------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------

    /// Apply a mutation and commit it. Returns `false` when the tree did not
    /// change (stale id, identical value), in which case nothing is recorded.
    pub fn apply(&mut self, mutation: Mutation) -> Result<bool, EditorError> {
        self.ensure_not_version_preview()?;
        let description = mutation.description(&self.tree);
        let next = mutation.apply(&self.tree)?;
        if let Mutation::InsertElement { element, .. } = &mutation {
            self.ids.advance_past(std::slice::from_ref(element));
        }
        Ok(self.commit(description, next))
    }

    /// Add a new element from `template`, appended to `parent_id` or the roots.
    /// Returns the new element's id, or `None` if the parent no longer exists.
    pub fn add_element(
        &mut self,
        template: &ElementTemplate,
        parent_id: Option<&str>,
    ) -> Result<Option<String>, EditorError> {
        self.ensure_not_version_preview()?;
        let element = template.materialize(&mut self.ids);
        let id = element.id.clone();
        let changed = self.apply(Mutation::InsertElement {
            parent_id: parent_id.map(str::to_string),
            index: None,
            element,
        })?;
        Ok(changed.then_some(id))
    }

    /// [`Self::add_element`] by palette name
    pub fn add_from_palette(&mut self, name: &str, parent_id: Option<&str>) -> Result<Option<String>, EditorError> {
        let template = find_template(name).ok_or_else(|| EditorError::UnknownTemplate(name.to_string()))?;
        self.add_element(&template, parent_id)
    }

    pub fn update_element(&mut self, id: &str, scope: UpdateScope) -> Result<bool, EditorError> {
        self.apply(Mutation::UpdateElement {
            node_id: id.to_string(),
            scope,
        })
    }

    /// Set one style property at the active breakpoint
    pub fn update_style(&mut self, id: &str, key: &str, value: &str) -> Result<bool, EditorError> {
        self.update_element(id, UpdateScope::style(self.breakpoint, key, value))
    }

    pub fn delete_element(&mut self, id: &str) -> Result<bool, EditorError> {
        self.apply(Mutation::DeleteElement {
            node_id: id.to_string(),
        })
    }

    pub fn move_element(&mut self, id: &str, new_parent_id: Option<&str>, index: usize) -> Result<bool, EditorError> {
        self.apply(Mutation::MoveElement {
            node_id: id.to_string(),
            new_parent_id: new_parent_id.map(str::to_string),
            index,
        })
    }

    /// Copy `id` with fresh ids right after the original. Returns the copy's id.
    pub fn duplicate_element(&mut self, id: &str) -> Result<Option<String>, EditorError> {
        self.ensure_not_version_preview()?;
        let (Some((parent_id, index)), Some(original)) =
            (mutations::locate(&self.tree, id), mutations::find_element(&self.tree, id))
        else {
            return Ok(None);
        };

        let copy = clone_with_fresh_ids(original, &mut self.ids);
        let copy_id = copy.id.clone();
        let description = format!("Duplicated {}", original.name);
        let next = mutations::insert_element(&self.tree, copy, parent_id.as_deref(), Some(index + 1))?;
        Ok(self.commit(description, next).then_some(copy_id))
    }

    /// Coalesce subsequent commits into one history entry
    pub fn begin_gesture(&mut self, description: impl Into<String>) -> Result<(), EditorError> {
        self.ensure_not_version_preview()?;
        self.history.begin_gesture(description);
        Ok(())
    }

    pub fn end_gesture(&mut self) {
        self.history.end_gesture();
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    pub fn undo(&mut self) -> Result<bool, EditorError> {
        self.ensure_not_version_preview()?;
        let restored = self.history.undo();
        Ok(self.restore_from_history(restored, "Undo"))
    }

    pub fn redo(&mut self) -> Result<bool, EditorError> {
        self.ensure_not_version_preview()?;
        let restored = self.history.redo();
        Ok(self.restore_from_history(restored, "Redo"))
    }

    /// Jump straight to a history entry
    pub fn jump_to(&mut self, index: usize) -> Result<bool, EditorError> {
        self.ensure_not_version_preview()?;
        let restored = self.history.jump_to(index);
        Ok(self.restore_from_history(restored, "Jump"))
    }

    // ------------------------------------------------------------------
    // Versions
    // ------------------------------------------------------------------

    /// Show a saved version in place of the live tree without touching history
    pub fn preview_version(&mut self, version: VersionSnapshot) {
        info!(version_id = %version.id, name = %version.name, "Previewing version");
        self.selected = None;
        self.tree = version.snapshot.clone();
        let mode = BuilderMode::PreviewingVersion {
            version_id: version.id.clone(),
            name: version.name.clone(),
        };
        self.previewing = Some(version);
        self.set_mode(mode);
        self.publish_document_changed("Previewing Version");
    }

    /// [`Self::preview_version`] for a version in the cached list
    pub fn preview_version_by_id(&mut self, version_id: &str) -> bool {
        match self.versions.iter().find(|v| v.id == version_id).cloned() {
            Some(version) => {
                self.preview_version(version);
                true
            }
            None => false,
        }
    }

    /// Commit the previewed version as the new live tree
    pub fn restore_version(&mut self) -> Result<(), EditorError> {
        let version = self.previewing.take().ok_or(EditorError::NotPreviewingVersion)?;
        let description = format!("Restored Version: {}", version.name);
        info!(version_id = %version.id, "Restoring version");

        self.history.end_gesture();
        let snapshot = self.repair_ids(version.snapshot);
        self.history.commit(description.clone(), &snapshot);
        self.tree = snapshot;
        self.dirty = true;
        self.notices.push(Notice {
            level: NoticeLevel::Info,
            message: format!("Restored version \"{}\"", version.name),
        });
        self.set_mode(BuilderMode::Editing);
        self.publish_document_changed(&description);
        Ok(())
    }

    /// Leave the version preview, back to the history's current tree
    pub fn cancel_preview(&mut self) -> Result<(), EditorError> {
        let version = self.previewing.take().ok_or(EditorError::NotPreviewingVersion)?;
        debug!(version_id = %version.id, "Cancelled version preview");

        self.tree = self.history.current().to_vec();
        self.set_mode(BuilderMode::Editing);
        self.publish_document_changed("Cancelled Preview");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Save the live tree. Refused while the stored page is unread.
    #[instrument(skip(self), fields(page_id = %self.page_id))]
    pub async fn save_page(&mut self) -> Result<(), EditorError> {
        if !self.loaded {
            warn!("Save refused, stored page was never loaded");
            self.notices.push(Notice {
                level: NoticeLevel::Error,
                message: "The saved page could not be loaded; reload it or choose overwrite".to_string(),
            });
            return Err(EditorError::PageNotLoaded);
        }
        self.write_page().await
    }

    /// Save the live tree even though the stored page was never read
    #[instrument(skip(self), fields(page_id = %self.page_id))]
    pub async fn overwrite_page(&mut self) -> Result<(), EditorError> {
        self.write_page().await?;
        self.loaded = true;
        Ok(())
    }

    async fn write_page(&mut self) -> Result<(), EditorError> {
        let result = guarded(
            PersistOp::SaveDocument,
            &self.busy,
            &self.cancel,
            self.config.persistence_timeout(),
            self.store.save_document(&self.page_id, self.history.current()),
        )
        .await;

        match result {
            Ok(()) => {
                self.dirty = false;
                info!("Page saved");
                Ok(())
            }
            Err(e) => Err(self.persist_failed_error(e)),
        }
    }

    /// Save when autosave is on and there is something to save
    pub async fn autosave(&mut self) -> Result<bool, EditorError> {
        if !self.config.autosave || !self.dirty {
            return Ok(false);
        }
        self.save_page().await?;
        Ok(true)
    }

    /// Snapshot the live tree as a named version
    #[instrument(skip(self), fields(page_id = %self.page_id))]
    pub async fn save_version(&mut self, name: &str) -> Result<VersionSnapshot, EditorError> {
        let result = guarded(
            PersistOp::SaveVersion,
            &self.busy,
            &self.cancel,
            self.config.persistence_timeout(),
            self.store.save_version(&self.page_id, name, self.history.current()),
        )
        .await;

        match result {
            Ok(version) => {
                info!(version_id = %version.id, "Version saved");
                self.versions.insert(0, version.clone());
                self.publish_versions_changed();
                Ok(version)
            }
            Err(e) => Err(self.persist_failed_error(e)),
        }
    }

    /// Re-read the version list from the store
    pub async fn refresh_versions(&mut self) -> Result<&[VersionSnapshot], EditorError> {
        let result = guarded(
            PersistOp::ListVersions,
            &self.busy,
            &self.cancel,
            self.config.persistence_timeout(),
            self.store.list_versions(&self.page_id),
        )
        .await;

        match result {
            Ok(versions) => {
                self.versions = versions;
                self.publish_versions_changed();
                Ok(&self.versions)
            }
            Err(e) => Err(self.persist_failed_error(e)),
        }
    }

    /// Delete a stored version. The live tree and history are untouched, and
    /// an active preview of that version stays open until restored or
    /// cancelled.
    #[instrument(skip(self), fields(page_id = %self.page_id))]
    pub async fn delete_version(&mut self, version_id: &str) -> Result<(), EditorError> {
        let result = guarded(
            PersistOp::DeleteVersion,
            &self.busy,
            &self.cancel,
            self.config.persistence_timeout(),
            self.store.delete_version(version_id),
        )
        .await;

        match result {
            Ok(()) => {
                self.versions.retain(|v| v.id != version_id);
                self.publish_versions_changed();
                Ok(())
            }
            Err(e) => Err(self.persist_failed_error(e)),
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn ensure_not_version_preview(&self) -> Result<(), EditorError> {
        if self.previewing.is_some() {
            warn!("Edit refused during version preview");
            return Err(EditorError::VersionPreviewActive);
        }
        Ok(())
    }

    /// Install `tree` as a fresh document: ids repaired, history reset
    fn adopt(&mut self, tree: Vec<Element>) {
        self.ids = IdGenerator::new(&self.page_id);
        let tree = self.repair_ids(tree);
        self.history.reset(&tree);
        self.tree = tree;
    }

    /// Advance the id generator past `tree` and reissue any duplicate ids
    fn repair_ids(&mut self, tree: Vec<Element>) -> Vec<Element> {
        self.ids.advance_past(&tree);
        let (tree, replaced) = mutations::reissue_duplicate_ids(&tree, &mut self.ids);
        if !replaced.is_empty() {
            warn!(page_id = %self.page_id, ?replaced, "Reissued duplicate element ids");
            self.notices.push(Notice {
                level: NoticeLevel::Info,
                message: format!("Gave {} element(s) with a duplicate id a new id", replaced.len()),
            });
        }
        tree
    }

    fn commit(&mut self, description: String, next: Vec<Element>) -> bool {
        if next == self.tree {
            debug!(%description, "No change, skipping commit");
            return false;
        }

        self.history.commit(description.clone(), &next);
        self.tree = next;
        self.dirty = true;
        self.prune_selection();
        self.publish_document_changed(&description);
        true
    }

    fn restore_from_history(&mut self, restored: Option<Vec<Element>>, action: &str) -> bool {
        let Some(tree) = restored else {
            return false;
        };
        self.tree = tree;
        self.dirty = true;
        self.prune_selection();
        let description = format!("{}: {}", action, self.history.current_entry().description);
        self.publish_document_changed(&description);
        true
    }

    fn prune_selection(&mut self) {
        if let Some(id) = &self.selected {
            if mutations::find_element(&self.tree, id).is_none() {
                self.selected = None;
            }
        }
    }

    fn set_mode(&mut self, mode: BuilderMode) {
        if self.mode == mode {
            return;
        }
        debug!(?mode, "Mode changed");
        self.mode = mode.clone();
        self.events.publish(BuilderEvent::ModeChanged { mode });
    }

    fn publish_document_changed(&mut self, description: &str) {
        self.events.publish(BuilderEvent::DocumentChanged {
            page_id: self.page_id.clone(),
            description: description.to_string(),
        });
    }

    fn publish_versions_changed(&mut self) {
        self.events.publish(BuilderEvent::VersionsChanged {
            page_id: self.page_id.clone(),
        });
    }

    fn persist_failed(&mut self, error: &PersistError) {
        warn!(page_id = %self.page_id, error = %error, "Persistence failed");
        let message = error.to_string();
        self.notices.push(Notice {
            level: NoticeLevel::Error,
            message: message.clone(),
        });
        self.events.publish(BuilderEvent::PersistFailed {
            page_id: self.page_id.clone(),
            message,
        });
    }

    fn persist_failed_error(&mut self, error: PersistError) -> EditorError {
        self.persist_failed(&error);
        EditorError::Persist(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use pagecraft_model::ElementKind;

    fn session() -> BuilderSession {
        BuilderSession::new("home", Vec::new(), Arc::new(MemoryStore::new()), BuilderConfig::default())
    }

    #[test]
    fn test_add_commits_history() {
        let mut s = session();
        let id = s.add_from_palette("Section", None).unwrap().unwrap();

        assert_eq!(s.tree().len(), 1);
        assert_eq!(s.tree()[0].id, id);
        assert_eq!(s.history().len(), 2);
        assert_eq!(s.history().current_entry().description, "Added Section");
        assert!(s.is_dirty());
    }

    #[test]
    fn test_unknown_template() {
        let mut s = session();
        assert!(matches!(
            s.add_from_palette("Carousel", None),
            Err(EditorError::UnknownTemplate(_))
        ));
    }

    #[test]
    fn test_noop_update_does_not_commit() {
        let mut s = session();
        let id = s.add_from_palette("Heading", None).unwrap().unwrap();
        assert!(s.update_style(&id, "color", "red").unwrap());
        let len = s.history().len();

        assert!(!s.update_style(&id, "color", "red").unwrap());
        assert!(!s.delete_element("missing").unwrap());
        assert_eq!(s.history().len(), len);
    }

    #[test]
    fn test_add_into_non_container_is_rejected() {
        let mut s = session();
        let heading = s.add_from_palette("Heading", None).unwrap().unwrap();
        let result = s.add_from_palette("Text", Some(&heading));
        assert!(matches!(result, Err(EditorError::Mutation(_))));
        assert_eq!(s.tree().len(), 1);
    }

    #[test]
    fn test_delete_clears_selection() {
        let mut s = session();
        let section = s.add_from_palette("Section", None).unwrap().unwrap();
        let heading = s.add_from_palette("Heading", Some(&section)).unwrap().unwrap();
        assert!(s.select(Some(&heading)));
        assert_eq!(s.selected_element().unwrap().kind, ElementKind::Heading);

        s.delete_element(&section).unwrap();
        assert!(s.selected_id().is_none());
    }

    #[test]
    fn test_no_selection_in_preview() {
        let mut s = session();
        let id = s.add_from_palette("Section", None).unwrap().unwrap();
        s.select(Some(&id));

        s.toggle_preview().unwrap();
        assert_eq!(s.mode(), &BuilderMode::Previewing);
        assert!(s.selected_id().is_none());
        assert!(!s.select(Some(&id)));

        s.toggle_preview().unwrap();
        assert_eq!(s.mode(), &BuilderMode::Editing);
    }

    #[test]
    fn test_duplicate_places_copy_after_original() {
        let mut s = session();
        let a = s.add_from_palette("Section", None).unwrap().unwrap();
        let b = s.add_from_palette("Divider", None).unwrap().unwrap();

        let copy = s.duplicate_element(&a).unwrap().unwrap();
        let ids: Vec<_> = s.tree().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec![a.as_str(), copy.as_str(), b.as_str()]);
        assert_eq!(s.history().current_entry().description, "Duplicated Section");
    }

    #[test]
    fn test_mobile_style_goes_to_override() {
        let mut s = session();
        let id = s.add_from_palette("Heading", None).unwrap().unwrap();
        s.set_breakpoint(Breakpoint::Mobile);
        s.update_style(&id, "fontSize", "24px").unwrap();

        let heading = s.selected_element().or_else(|| s.tree().first()).unwrap();
        assert_eq!(heading.style.get("fontSize").map(String::as_str), Some("40px"));
        assert_eq!(
            heading
                .responsive_overrides
                .layer(Breakpoint::Mobile)
                .and_then(|m| m.get("fontSize"))
                .map(String::as_str),
            Some("24px")
        );
        assert_eq!(s.history().current_entry().description, "Styled Heading (Mobile)");
    }

    #[test]
    fn test_events_published_on_commit() {
        let mut s = session();
        let mut rx = s.subscribe(Topic::Document("home".to_string()));
        s.add_from_palette("Spacer", None).unwrap();

        match rx.try_recv() {
            Ok(BuilderEvent::DocumentChanged { description, .. }) => assert_eq!(description, "Added Spacer"),
            other => panic!("Expected DocumentChanged, got {:?}", other),
        }
    }
}
