//! # Store Configuration
//!
//! Where and under which key the application state is kept. Defaults match
//! the browser build (`chemlab-storage`); the terminal front-end can point
//! the data directory elsewhere through the environment.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Storage key of the application state
pub const DEFAULT_STORAGE_KEY: &str = "chemlab-storage";

/// Appended to the storage key for the copy of a document that failed to load
pub const UNREADABLE_SUFFIX: &str = ".unreadable";

/// Directory used by [`crate::storage::FileStorage`] when none is configured
pub const DEFAULT_DATA_DIR: &str = "chemlab-data";

/// Environment variable overriding [`StoreConfig::data_dir`]
pub const DATA_DIR_ENV: &str = "CHEMLAB_DATA_DIR";

/// Environment variable overriding [`StoreConfig::storage_key`]
pub const STORAGE_KEY_ENV: &str = "CHEMLAB_STORAGE_KEY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Key the state document is stored under
    pub storage_key: String,

    /// Directory for file-backed storage
    pub data_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl StoreConfig {
    /// Defaults, overridden by `CHEMLAB_DATA_DIR` / `CHEMLAB_STORAGE_KEY`
    /// when set and non-empty.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Key a document that failed to load is copied to before being replaced
    pub fn unreadable_key(&self) -> String {
        format!("{}{}", self.storage_key, UNREADABLE_SUFFIX)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = StoreConfig::default();
        if let Some(dir) = lookup(DATA_DIR_ENV).filter(|v| !v.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(key) = lookup(STORAGE_KEY_ENV).filter(|v| !v.trim().is_empty()) {
            config.storage_key = key;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.storage_key, "chemlab-storage");
        assert_eq!(config.data_dir, PathBuf::from("chemlab-data"));
        assert_eq!(config.unreadable_key(), "chemlab-storage.unreadable");
    }

    #[test]
    fn test_overrides() {
        let config = StoreConfig::from_lookup(|name| match name {
            DATA_DIR_ENV => Some("/srv/lab".to_string()),
            STORAGE_KEY_ENV => Some("   ".to_string()),
            _ => None,
        });
        assert_eq!(config.data_dir, PathBuf::from("/srv/lab"));
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
    }
}
