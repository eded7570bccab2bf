//! Key-value persistence port.
//!
//! A [`KeyValueStore`] holds named text blobs. The record store's persisted
//! variant reads one blob at startup and rewrites it after every mutation.
//!
//! Two backends are provided:
//! - [`MemoryStore`] keeps blobs in a map, for tests and ephemeral sessions
//! - [`FileStore`] keeps one `<key>.json` file per key under a directory

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use thiserror::Error;

/// Errors raised by a [`KeyValueStore`].
///
/// None of these are fatal to the caller. Reads fall back to seed data and
/// writes are dropped.
///
/// # Recovery Strategies
///
/// | Error Variant | Recovery Strategy |
/// |--------------|-------------------|
/// | [`Unavailable`](StorageError::Unavailable) | Use in-memory data, drop the write |
/// | [`Malformed`](StorageError::Malformed) | Treat the slot as absent |
/// | [`InvalidKey`](StorageError::InvalidKey) | Programming error, fix the key |
///
/// The variants carry messages rather than `io::Error` so the type stays
/// `Clone` and `PartialEq` for tests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The backing medium could not be read or written.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The blob exists but does not decode to the expected shape.
    #[error("malformed blob: {0}")]
    Malformed(String),

    /// The key contains characters that cannot name a slot.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

impl StorageError {
    /// Creates an unavailable error with the given message.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    /// Creates a malformed-content error with the given message.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }
}

impl From<io::Error> for StorageError {
    fn from(e: io::Error) -> Self {
        Self::Unavailable(e.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        Self::Malformed(e.to_string())
    }
}

/// A named-slot blob store.
///
/// Methods take `&self` so a single store can be shared between screens
/// behind an `Arc`.
pub trait KeyValueStore: Send + Sync {
    /// Reads the blob stored under `key`, or `None` if the slot is empty.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the blob stored under `key`.
    fn save(&self, key: &str, blob: &str) -> Result<(), StorageError>;
}

fn check_key(key: &str) -> Result<(), StorageError> {
    let ok = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if ok {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

// -----------------------------------------------------------------------------
// MemoryStore
// -----------------------------------------------------------------------------

/// In-memory [`KeyValueStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<String, String>>,
    fail_writes: Mutex<bool>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with one slot already filled.
    #[must_use]
    pub fn with_blob(key: impl Into<String>, blob: impl Into<String>) -> Self {
        let store = Self::new();
        store.slots.lock().insert(key.into(), blob.into());
        store
    }

    /// Makes every subsequent `save` fail with [`StorageError::Unavailable`].
    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.lock() = fail;
    }

    /// Returns a copy of the raw blob under `key`.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.slots.lock().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        check_key(key)?;
        Ok(self.slots.lock().get(key).cloned())
    }

    fn save(&self, key: &str, blob: &str) -> Result<(), StorageError> {
        check_key(key)?;
        if *self.fail_writes.lock() {
            return Err(StorageError::unavailable("writes disabled"));
        }
        self.slots.lock().insert(key.to_string(), blob.to_string());
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// FileStore
// -----------------------------------------------------------------------------

/// Directory-backed [`KeyValueStore`].
///
/// Each key is stored as `<root>/<key>.json`. The directory is created on the
/// first write.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `root`. Nothing is touched on disk yet.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the file backing `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        check_key(key)?;
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                Err(StorageError::malformed(e.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: &str, blob: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root)?;

        // Replace atomically.
        let tmp = self.root.join(format!(".{key}.json.tmp"));
        fs::write(&tmp, blob)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.load("notes").unwrap(), None);

        store.save("notes", "[1,2]").unwrap();
        assert_eq!(store.load("notes").unwrap().as_deref(), Some("[1,2]"));
    }

    #[test]
    fn test_memory_store_fail_writes() {
        let store = MemoryStore::with_blob("notes", "old");
        store.set_fail_writes(true);

        let err = store.save("notes", "new").unwrap_err();
        assert!(matches!(err, StorageError::Unavailable(_)));
        assert_eq!(store.raw("notes").as_deref(), Some("old"));
    }

    #[test]
    fn test_invalid_keys_rejected() {
        let store = MemoryStore::new();
        for key in ["", "../etc", "a b", "x/y"] {
            assert!(
                matches!(store.save(key, "{}"), Err(StorageError::InvalidKey(_))),
                "{key:?} should be rejected"
            );
        }
        assert!(store.save("mp-records", "[]").is_ok());
        assert!(store.save("grades_2024", "[]").is_ok());
    }

    #[test]
    fn test_file_store_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("never-created"));
        assert_eq!(store.load("mp-records").unwrap(), None);
    }

    #[test]
    fn test_file_store_creates_directory_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("nested").join("data");
        let store = FileStore::new(&root);

        store.save("mp-records", "[]").unwrap();
        assert!(root.join("mp-records.json").is_file());
        assert_eq!(store.load("mp-records").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_file_store_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.save("k", "first").unwrap();
        store.save("k", "second").unwrap();
        assert_eq!(store.load("k").unwrap().as_deref(), Some("second"));
        assert!(!dir.path().join(".k.json.tmp").exists());
    }

    #[test]
    fn test_error_display() {
        let e = StorageError::unavailable("disk full");
        assert_eq!(e.to_string(), "storage unavailable: disk full");

        let e = StorageError::malformed("expected array");
        assert!(e.to_string().contains("expected array"));
    }
}
