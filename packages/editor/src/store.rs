//! # Document Storage
//!
//! The builder's only contact with persistence. Hosts provide a
//! [`DocumentStore`] over whatever transport they like; the builder treats
//! every call as best-effort and keeps its in-memory tree authoritative.
//!
//! Two implementations ship with the crate:
//! - [`MemoryStore`]: in-memory, with optional simulated latency and failure
//!   injection (tests, demos)
//! - [`JsonFileStore`](crate::JsonFileStore): one JSON file per page and per
//!   page's version list

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagecraft_model::Element;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid page id: {0}")]
    InvalidPageId(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Named, timestamped copy of a page, independent of undo/redo history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionSnapshot {
    pub id: String,
    pub page_id: String,
    pub name: String,
    #[serde(rename = "tree")]
    pub snapshot: Vec<Element>,
    pub timestamp: DateTime<Utc>,
}

impl VersionSnapshot {
    pub fn new(page_id: &str, seq: u64, name: impl Into<String>, tree: &[Element]) -> Self {
        Self {
            id: version_id(page_id, seq),
            page_id: page_id.to_string(),
            name: name.into(),
            snapshot: tree.to_vec(),
            timestamp: Utc::now(),
        }
    }
}

/// Version ids embed their page: `<page_id>~<seq>`
pub fn version_id(page_id: &str, seq: u64) -> String {
    format!("{}~{}", page_id, seq)
}

/// Split a version id into page id and sequence number
pub fn parse_version_id(id: &str) -> Option<(&str, u64)> {
    let (page_id, seq) = id.rsplit_once('~')?;
    Some((page_id, seq.parse().ok()?))
}

/// Persistence contract consumed by the builder
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Current tree of a page. Unknown pages load as empty.
    async fn load_document(&self, page_id: &str) -> Result<Vec<Element>, StoreError>;

    /// Persist `tree` as "the page"
    async fn save_document(&self, page_id: &str, tree: &[Element]) -> Result<(), StoreError>;

    /// Snapshots for a page, newest first
    async fn list_versions(&self, page_id: &str) -> Result<Vec<VersionSnapshot>, StoreError>;

    async fn save_version(
        &self,
        page_id: &str,
        name: &str,
        tree: &[Element],
    ) -> Result<VersionSnapshot, StoreError>;

    /// Remove a snapshot. Unknown ids are ignored.
    async fn delete_version(&self, version_id: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Default)]
struct MemoryState {
    pages: HashMap<String, Vec<Element>>,
    /// In save order, oldest first
    versions: Vec<VersionSnapshot>,
    next_seq: u64,
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
    latency: Option<Duration>,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every call by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Seed a page
    pub fn with_page(mut self, page_id: impl Into<String>, tree: Vec<Element>) -> Self {
        if let Ok(state) = self.state.get_mut() {
            state.pages.insert(page_id.into(), tree);
        }
        self
    }

    /// Make every subsequent call fail with [`StoreError::Unavailable`]
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Stored tree of a page, bypassing latency and failure injection
    pub fn stored_page(&self, page_id: &str) -> Option<Vec<Element>> {
        self.state.lock().ok()?.pages.get(page_id).cloned()
    }

    async fn round_trip(&self) -> Result<MutexGuard<'_, MemoryState>, StoreError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("simulated failure".to_string()));
        }
        self.state
            .lock()
            .map_err(|_| StoreError::Unavailable("store state poisoned".to_string()))
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    #[instrument(skip(self))]
    async fn load_document(&self, page_id: &str) -> Result<Vec<Element>, StoreError> {
        let state = self.round_trip().await?;
        Ok(state.pages.get(page_id).cloned().unwrap_or_default())
    }

    #[instrument(skip(self, tree), fields(roots = tree.len()))]
    async fn save_document(&self, page_id: &str, tree: &[Element]) -> Result<(), StoreError> {
        let mut state = self.round_trip().await?;
        state.pages.insert(page_id.to_string(), tree.to_vec());
        debug!("Saved page");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_versions(&self, page_id: &str) -> Result<Vec<VersionSnapshot>, StoreError> {
        let state = self.round_trip().await?;
        Ok(state
            .versions
            .iter()
            .rev()
            .filter(|v| v.page_id == page_id)
            .cloned()
            .collect())
    }

    #[instrument(skip(self, tree))]
    async fn save_version(
        &self,
        page_id: &str,
        name: &str,
        tree: &[Element],
    ) -> Result<VersionSnapshot, StoreError> {
        let mut state = self.round_trip().await?;
        state.next_seq += 1;
        let version = VersionSnapshot::new(page_id, state.next_seq, name, tree);
        state.versions.push(version.clone());
        Ok(version)
    }

    #[instrument(skip(self))]
    async fn delete_version(&self, version_id: &str) -> Result<(), StoreError> {
        let mut state = self.round_trip().await?;
        state.versions.retain(|v| v.id != version_id);
        Ok(())
    }
}
