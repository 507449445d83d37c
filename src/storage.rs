//! Namespaced key-value persistence
//!
//! One pretty-printed JSON file per key under the platform data dir. The
//! studio's collections are loaded once at view mount and rewritten in full
//! on every mutation; a failed write is a warning, never a crash.

use serde::{de::DeserializeOwned, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored data is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
}

/// A small swappable key-value store backed by JSON files
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Store rooted in the platform data dir
    pub fn open_default() -> Self {
        let root = dirs::data_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_default())
            .join("CineBanana");
        Self::new(root)
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    /// Load the value stored under `key`, or None if absent or unreadable.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.key_path(key);
        if !path.exists() {
            return None;
        }
        match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!("failed to parse stored {key}: {e}");
                    None
                }
            },
            Err(e) => {
                tracing::warn!("failed to read stored {key}: {e}");
                None
            }
        }
    }

    /// Replace the value stored under `key`.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.root)?;
        let contents = serde_json::to_string_pretty(value)?;
        std::fs::write(self.key_path(key), contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().to_path_buf());

        store.save("numbers", &vec![1u32, 2, 3]).unwrap();
        let loaded: Vec<u32> = store.load("numbers").unwrap();
        assert_eq!(loaded, vec![1, 2, 3]);
    }

    #[test]
    fn absent_key_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().to_path_buf());
        assert_eq!(store.load::<Vec<u32>>("missing"), None);
    }

    #[test]
    fn corrupt_data_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().to_path_buf());
        std::fs::write(dir.path().join("broken.json"), "{not json").unwrap();
        assert_eq!(store.load::<Vec<u32>>("broken"), None);
    }
}
