//! Durable key-value storage.
//!
//! The store only needs a single slot read once at startup and overwritten
//! after each mutation, so the port is just `get`/`set` on string values.

use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::{AppError, AppResult};

/// A persistent key-value slot local to the device.
pub trait KeyValueStore: Send + Sync + 'static {
    /// Read the value stored under `key`, or `None` if nothing was stored.
    fn get(&self, key: &str) -> impl Future<Output = AppResult<Option<String>>> + Send;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: String) -> impl Future<Output = AppResult<()>> + Send;
}

// --- File Implementation ---

/// Stores each key as a JSON file inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(file_name_for(key))
    }
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let path = self.path_for(key);

        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Storage(format!(
                "Could not read {}: {e}",
                path.display()
            ))),
        }
    }

    async fn set(&self, key: &str, value: String) -> AppResult<()> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let path = self.path_for(key);
        let temp = path.with_extension("json.tmp");

        tokio::fs::write(&temp, value).await?;
        tokio::fs::rename(&temp, &path).await?;
        Ok(())
    }
}

/// Turn a storage key into a filename-safe name.
fn file_name_for(key: &str) -> String {
    let sanitized: String = key
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    let trimmed = sanitized.trim_matches('_');

    if trimmed.is_empty() {
        "store.json".to_string()
    } else {
        format!("{trimmed}.json")
    }
}

// --- Memory Implementation ---

/// In-process storage. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value without going through the async port.
    pub fn insert(&self, key: &str, value: impl Into<String>) -> AppResult<()> {
        self.entries()?.insert(key.to_string(), value.into());
        Ok(())
    }

    fn entries(&self) -> AppResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| AppError::Storage("memory store lock poisoned".into()))
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> AppResult<()> {
        self.entries()?.insert(key.to_string(), value);
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_are_sanitized() {
        assert_eq!(file_name_for("@appointments_v1"), "appointments_v1.json");
        assert_eq!(file_name_for("a/b:c"), "a_b_c.json");
        assert_eq!(file_name_for("@@"), "store.json");
    }

    #[tokio::test]
    async fn file_store_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        assert_eq!(store.get("@appointments_v1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn file_store_set_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested"));

        store.set("@appointments_v1", "[]".into()).await.unwrap();
        store.set("@appointments_v1", "[1]".into()).await.unwrap();

        assert_eq!(
            store.get("@appointments_v1").await.unwrap().as_deref(),
            Some("[1]")
        );
        assert!(store.path_for("@appointments_v1").exists());
        assert!(!store.path_for("@appointments_v1").with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn memory_store_clones_share_entries() {
        let store = MemoryStore::new();
        let other = store.clone();

        store.set("k", "v".into()).await.unwrap();
        assert_eq!(other.get("k").await.unwrap().as_deref(), Some("v"));
        assert_eq!(other.get("missing").await.unwrap(), None);
    }
}
