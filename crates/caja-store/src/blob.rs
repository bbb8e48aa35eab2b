//! # Blob Store
//!
//! The key-value blob store contract the persistence gateway sits on, and
//! two implementations: a directory of JSON files for real deployments
//! and an in-memory map for tests.
//!
//! All access is synchronous and scoped: acquire, read or write one key,
//! release. No handle is held across operations.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::StoreError;

// =============================================================================
// BlobStore Trait
// =============================================================================

/// A minimal string-keyed blob store.
///
/// The gateway stores exactly two keys (state and company profile), so
/// the contract stays deliberately small: load, save, wipe.
pub trait BlobStore {
    /// Reads the blob under `key`, or `None` if it was never written.
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes the blob under `key`, replacing any previous value.
    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes every stored blob. Backs the factory-reset flow.
    fn clear(&mut self) -> Result<(), StoreError>;
}

// =============================================================================
// JsonFileStore
// =============================================================================

/// File-backed store: one `<key>.json` file per key inside a directory.
#[derive(Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Opens (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(JsonFileStore { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl BlobStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                fs::remove_file(path)?;
            }
        }
        Ok(())
    }
}

// =============================================================================
// MemoryStore
// =============================================================================

/// In-memory store for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl BlobStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.blobs.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.blobs.clear();
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert!(store.load("k").unwrap().is_none());

        store.save("k", "{\"a\":1}").unwrap();
        assert_eq!(store.load("k").unwrap().unwrap(), "{\"a\":1}");

        store.save("k", "{}").unwrap();
        assert_eq!(store.load("k").unwrap().unwrap(), "{}");

        store.clear().unwrap();
        assert!(store.load("k").unwrap().is_none());
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path()).unwrap();

        assert!(store.load("caja_state").unwrap().is_none());

        store.save("caja_state", "{\"products\":[]}").unwrap();
        assert_eq!(
            store.load("caja_state").unwrap().unwrap(),
            "{\"products\":[]}"
        );
        assert!(dir.path().join("caja_state.json").exists());
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = JsonFileStore::open(dir.path()).unwrap();
            store.save("caja_state", "persisted").unwrap();
        }
        let store = JsonFileStore::open(dir.path()).unwrap();
        assert_eq!(store.load("caja_state").unwrap().unwrap(), "persisted");
    }

    #[test]
    fn test_file_store_clear_removes_all_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path()).unwrap();
        store.save("caja_state", "{}").unwrap();
        store.save("caja_company", "{}").unwrap();

        store.clear().unwrap();
        assert!(store.load("caja_state").unwrap().is_none());
        assert!(store.load("caja_company").unwrap().is_none());
    }
}
