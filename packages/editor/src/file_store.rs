//! JSON-on-disk [`DocumentStore`].
//!
//! ```text
//! <root>/pages/<page_id>.json      current tree
//! <root>/versions/<page_id>.json   version list, oldest first
//! ```

use crate::store::{parse_version_id, DocumentStore, StoreError, VersionSnapshot};
use async_trait::async_trait;
use pagecraft_model::Element;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

pub struct JsonFileStore {
    root: PathBuf,
    /// Serializes writes; page saves share a temp path and version saves
    /// are read-modify-write
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn page_path(&self, page_id: &str) -> Result<PathBuf, StoreError> {
        Ok(self.root.join("pages").join(file_name(page_id)?))
    }

    fn versions_path(&self, page_id: &str) -> Result<PathBuf, StoreError> {
        Ok(self.root.join("versions").join(file_name(page_id)?))
    }

    async fn read_versions(&self, page_id: &str) -> Result<Vec<VersionSnapshot>, StoreError> {
        read_json_or_default(&self.versions_path(page_id)?).await
    }

    async fn write_versions(&self, page_id: &str, versions: &[VersionSnapshot]) -> Result<(), StoreError> {
        write_json(&self.versions_path(page_id)?, &versions).await
    }
}

/// Page ids become file names, so they may not escape the store directory
fn file_name(page_id: &str) -> Result<String, StoreError> {
    let valid = !page_id.is_empty()
        && page_id != "."
        && page_id != ".."
        && !page_id.contains(['/', '\\', '\0']);
    if valid {
        Ok(format!("{}.json", page_id))
    } else {
        Err(StoreError::InvalidPageId(page_id.to_string()))
    }
}

async fn read_json_or_default<T>(path: &Path) -> Result<T, StoreError>
where
    T: serde::de::DeserializeOwned + Default,
{
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok(serde_json::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(T::default()),
        Err(e) => Err(e.into()),
    }
}

async fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    if let Some(dir) = path.parent() {
        tokio::fs::create_dir_all(dir).await?;
    }
    let content = serde_json::to_string_pretty(value)?;
    // Write-then-rename so a crash never leaves a truncated page behind
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, content).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    #[instrument(skip(self), fields(root = %self.root.display()))]
    async fn load_document(&self, page_id: &str) -> Result<Vec<Element>, StoreError> {
        let tree: Vec<Element> = read_json_or_default(&self.page_path(page_id)?).await?;
        info!(roots = tree.len(), "Loaded page");
        Ok(tree)
    }

    #[instrument(skip(self, tree), fields(root = %self.root.display(), roots = tree.len()))]
    async fn save_document(&self, page_id: &str, tree: &[Element]) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        write_json(&self.page_path(page_id)?, &tree).await?;
        info!("Saved page");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_versions(&self, page_id: &str) -> Result<Vec<VersionSnapshot>, StoreError> {
        let mut versions = self.read_versions(page_id).await?;
        versions.reverse();
        Ok(versions)
    }

    #[instrument(skip(self, tree))]
    async fn save_version(
        &self,
        page_id: &str,
        name: &str,
        tree: &[Element],
    ) -> Result<VersionSnapshot, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut versions = self.read_versions(page_id).await?;
        let seq = versions
            .iter()
            .filter_map(|v| parse_version_id(&v.id).map(|(_, seq)| seq))
            .max()
            .unwrap_or(0)
            + 1;

        let version = VersionSnapshot::new(page_id, seq, name, tree);
        versions.push(version.clone());
        self.write_versions(page_id, &versions).await?;
        debug!(version_id = %version.id, "Saved version");
        Ok(version)
    }

    #[instrument(skip(self))]
    async fn delete_version(&self, version_id: &str) -> Result<(), StoreError> {
        let Some((page_id, _)) = parse_version_id(version_id) else {
            debug!("Malformed version id, ignoring");
            return Ok(());
        };

        let _guard = self.write_lock.lock().await;
        let mut versions = self.read_versions(page_id).await?;
        let before = versions.len();
        versions.retain(|v| v.id != version_id);
        if versions.len() != before {
            self.write_versions(page_id, &versions).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_model::ElementKind;

    #[test]
    fn test_rejects_path_like_page_ids() {
        assert!(file_name("home").is_ok());
        assert!(matches!(file_name("../etc"), Err(StoreError::InvalidPageId(_))));
        assert!(matches!(file_name(""), Err(StoreError::InvalidPageId(_))));
        assert!(matches!(file_name(".."), Err(StoreError::InvalidPageId(_))));
    }

    #[tokio::test]
    async fn test_round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        let tree = vec![Element::new("s", ElementKind::Section, "Hero")
            .with_child(Element::new("h", ElementKind::Heading, "Title").with_content("Hi"))];

        assert!(store.load_document("home").await.unwrap().is_empty());
        store.save_document("home", &tree).await.unwrap();
        assert_eq!(store.load_document("home").await.unwrap(), tree);
        assert!(dir.path().join("pages/home.json").exists());
    }

    #[tokio::test]
    async fn test_versions_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        let v1 = store.save_version("home", "v1", &[]).await.unwrap();
        let v2 = store.save_version("home", "v2", &[]).await.unwrap();
        assert_ne!(v1.id, v2.id);

        let listed = store.list_versions("home").await.unwrap();
        assert_eq!(listed[0].name, "v2");
        assert_eq!(listed[1].name, "v1");

        store.delete_version(&v1.id).await.unwrap();
        let reopened = JsonFileStore::new(dir.path());
        let listed = reopened.list_versions("home").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, v2.id);

        // A fresh sequence number, never a reused one
        let v3 = reopened.save_version("home", "v3", &[]).await.unwrap();
        assert_ne!(v3.id, v1.id);
        assert_ne!(v3.id, v2.id);
    }

    #[tokio::test]
    async fn test_overlapping_saves_of_one_page() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        let first = vec![Element::new("a", ElementKind::Section, "First")];
        let second = vec![Element::new("b", ElementKind::Section, "Second")];

        let (a, b) = tokio::join!(
            store.save_document("home", &first),
            store.save_document("home", &second)
        );
        a.unwrap();
        b.unwrap();

        let saved = store.load_document("home").await.unwrap();
        assert!(saved == first || saved == second);
        assert!(!dir.path().join("pages/home.json.tmp").exists());
    }
}
