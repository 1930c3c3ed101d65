//! # Key-Value Storage
//!
//! The application state is persisted as one JSON document under one key,
//! the way a browser app keeps it in local storage:
//!
//! ```json
//! { "state": { "inventory": [], "labWorks": [] }, "version": 0 }
//! ```
//!
//! Two backends implement [`KeyValueStorage`]:
//!
//! - [`MemoryStorage`]: a map in memory, for tests and embedding
//! - [`FileStorage`]: one `<key>.json` file per key in a data directory,
//!   written atomically (temp file, fsync, rename)
//!
//! ## Example
//!
//! ```rust,no_run
//! use chemlab_core::storage::{FileStorage, KeyValueStorage};
//!
//! let mut storage = FileStorage::new("chemlab-data");
//! storage.set("chemlab-storage", r#"{"state":{"inventory":[],"labWorks":[]},"version":0}"#)?;
//! assert!(storage.get("chemlab-storage")?.is_some());
//! # Ok::<(), chemlab_core::errors::LabError>(())
//! ```

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{LabError, LabResult};
use crate::store::AppState;

/// Schema version written to storage
pub const STATE_VERSION: u32 = 0;

/// Minimal string key-value store.
pub trait KeyValueStorage {
    /// Stored value, or `None` if the key was never written
    fn get(&self, key: &str) -> LabResult<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> LabResult<()>;

    /// Removing a missing key is not an error
    fn remove(&mut self, key: &str) -> LabResult<()>;
}

/// In-memory storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> LabResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> LabResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> LabResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Directory-backed storage, one JSON file per key.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File that holds `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.json", file_name))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> LabResult<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(LabError::storage("read", path.display().to_string(), e.to_string())),
        }
    }

    /// Write to `<key>.json.tmp`, sync, then rename over `<key>.json`, so an
    /// interrupted write never leaves a truncated document behind.
    fn set(&mut self, key: &str, value: &str) -> LabResult<()> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            LabError::storage("create directory", self.dir.display().to_string(), e.to_string())
        })?;

        let path = self.path_for(key);
        let tmp_path = path.with_extension("json.tmp");

        let mut tmp_file = File::create(&tmp_path).map_err(|e| {
            LabError::storage("create temp file", tmp_path.display().to_string(), e.to_string())
        })?;

        tmp_file.write_all(value.as_bytes()).map_err(|e| {
            LabError::storage("write temp file", tmp_path.display().to_string(), e.to_string())
        })?;

        tmp_file.sync_all().map_err(|e| {
            LabError::storage("sync temp file", tmp_path.display().to_string(), e.to_string())
        })?;

        fs::rename(&tmp_path, &path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            LabError::storage("rename to final", path.display().to_string(), e.to_string())
        })?;

        Ok(())
    }

    fn remove(&mut self, key: &str) -> LabResult<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(LabError::storage("remove", path.display().to_string(), e.to_string())),
        }
    }
}

/// Stored document layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedState {
    pub state: AppState,
    pub version: u32,
}

/// Serialize `state` in the stored layout.
pub fn encode_state(state: &AppState) -> LabResult<String> {
    #[derive(Serialize)]
    struct Borrowed<'a> {
        state: &'a AppState,
        version: u32,
    }
    Ok(serde_json::to_string(&Borrowed {
        state,
        version: STATE_VERSION,
    })?)
}

/// Parse a stored document, rejecting versions newer than [`STATE_VERSION`].
pub fn decode_state(json: &str) -> LabResult<AppState> {
    let persisted: PersistedState = serde_json::from_str(json)?;
    validate_version(persisted.version)?;
    Ok(persisted.state)
}

/// Older documents share the current layout; newer ones may not.
fn validate_version(version: u32) -> LabResult<()> {
    if version > STATE_VERSION {
        return Err(LabError::VersionMismatch {
            found: version,
            supported: STATE_VERSION,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_memory_storage() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get("k").unwrap(), None);
        storage.set("k", "v").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
        storage.remove("k").unwrap();
        storage.remove("k").unwrap();
        assert_eq!(storage.get("k").unwrap(), None);
    }

    #[test]
    fn test_path_for_key() {
        let storage = FileStorage::new("/data");
        assert_eq!(storage.path_for("chemlab-storage"), Path::new("/data/chemlab-storage.json"));
        assert_eq!(storage.path_for("../escape"), Path::new("/data/___escape.json"));
    }

    #[test]
    fn test_file_storage_roundtrip() {
        let dir = tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path().join("nested"));
        assert_eq!(storage.get("chemlab-storage").unwrap(), None);

        storage.set("chemlab-storage", "{\"a\":1}").unwrap();
        assert_eq!(storage.get("chemlab-storage").unwrap().as_deref(), Some("{\"a\":1}"));

        storage.set("chemlab-storage", "{\"a\":2}").unwrap();
        assert_eq!(storage.get("chemlab-storage").unwrap().as_deref(), Some("{\"a\":2}"));

        storage.remove("chemlab-storage").unwrap();
        assert_eq!(storage.get("chemlab-storage").unwrap(), None);
    }

    #[test]
    fn test_atomic_write_leaves_no_tmp_file() {
        let dir = tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path());
        storage.set("chemlab-storage", "{}").unwrap();

        let path = storage.path_for("chemlab-storage");
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_encode_layout() {
        let json = encode_state(&AppState::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["version"], 0);
        assert!(value["state"]["inventory"].as_array().unwrap().is_empty());
        assert!(value["state"]["labWorks"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_decode_rejects_newer_version() {
        let json = r#"{"state":{"inventory":[],"labWorks":[]},"version":1}"#;
        let err = decode_state(json).unwrap_err();
        assert_eq!(err, LabError::VersionMismatch { found: 1, supported: 0 });
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert_eq!(decode_state("not json").unwrap_err().error_code(), "SERIALIZATION_ERROR");
    }
}
