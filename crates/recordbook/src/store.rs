//! Ordered record lists.
//!
//! [`RecordStore`] is the authoritative, index-addressed list for one screen.
//! [`PersistentStore`] mirrors a store into a [`KeyValueStore`] slot: it is
//! loaded once and rewritten after every mutation, best effort.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::form::RecordSink;
use crate::storage::{KeyValueStore, StorageError};

/// An in-memory ordered list of records.
///
/// Insertion order is display order. Indices are only meaningful against
/// this (unfiltered) sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordStore<R> {
    records: Vec<R>,
}

impl<R> Default for RecordStore<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<R> RecordStore<R> {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `records` in order.
    #[must_use]
    pub fn from_records(records: Vec<R>) -> Self {
        Self { records }
    }

    /// Returns the records in order.
    #[must_use]
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Returns the record at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&R> {
        self.records.get(index)
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Appends a record at the end. Duplicates are allowed.
    pub fn append(&mut self, record: R) -> usize {
        self.records.push(record);
        self.records.len() - 1
    }

    /// Replaces the record at `index`. Out-of-bounds indices are ignored.
    pub fn replace_at(&mut self, index: usize, record: R) -> bool {
        match self.records.get_mut(index) {
            Some(slot) => {
                *slot = record;
                true
            }
            None => false,
        }
    }

    /// Removes the record at `index`, shifting later records down by one.
    pub fn remove_at(&mut self, index: usize) -> Option<R> {
        (index < self.records.len()).then(|| self.records.remove(index))
    }

    /// Consumes the store, returning the records.
    #[must_use]
    pub fn into_records(self) -> Vec<R> {
        self.records
    }
}

impl<R> RecordSink<R> for RecordStore<R> {
    fn append(&mut self, record: R) -> usize {
        RecordStore::append(self, record)
    }

    fn replace_at(&mut self, index: usize, record: R) -> bool {
        RecordStore::replace_at(self, index, record)
    }
}

// -----------------------------------------------------------------------------
// PersistentStore
// -----------------------------------------------------------------------------

/// A [`RecordStore`] mirrored into one key-value slot.
pub struct PersistentStore<R> {
    inner: RecordStore<R>,
    port: Arc<dyn KeyValueStore>,
    key: String,
}

impl<R> std::fmt::Debug for PersistentStore<R>
where
    R: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistentStore")
            .field("key", &self.key)
            .field("records", &self.inner.records)
            .finish_non_exhaustive()
    }
}

impl<R: Serialize + DeserializeOwned> PersistentStore<R> {
    /// Loads the list stored under `key`.
    ///
    /// An absent, unreadable or undecodable slot falls back to `seed`, which
    /// is then written back so the next session sees it.
    pub fn load(port: Arc<dyn KeyValueStore>, key: impl Into<String>, seed: Vec<R>) -> Self {
        let key = key.into();
        let loaded = match port.load(&key) {
            Ok(Some(blob)) => match serde_json::from_str::<Vec<R>>(&blob) {
                Ok(records) => Some(records),
                Err(e) => {
                    warn!(key = %key, error = %e, "stored records are malformed, using seed");
                    None
                }
            },
            Ok(None) => {
                info!(key = %key, "no stored records, using seed");
                None
            }
            Err(e) => {
                warn!(key = %key, error = %e, "could not read stored records, using seed");
                None
            }
        };

        match loaded {
            Some(records) => {
                debug!(key = %key, count = records.len(), "loaded stored records");
                Self {
                    inner: RecordStore::from_records(records),
                    port,
                    key,
                }
            }
            None => {
                let store = Self {
                    inner: RecordStore::from_records(seed),
                    port,
                    key,
                };
                store.persist();
                store
            }
        }
    }

    /// Serializes the current list into the slot.
    pub fn save(&self) -> Result<(), StorageError> {
        let blob = serde_json::to_string(&self.inner.records)?;
        self.port.save(&self.key, &blob)
    }

    fn persist(&self) {
        if let Err(e) = self.save() {
            warn!(key = %self.key, error = %e, "dropped record write");
        }
    }

    /// Appends a record and persists.
    pub fn append(&mut self, record: R) -> usize {
        let index = self.inner.append(record);
        self.persist();
        index
    }

    /// Replaces the record at `index` and persists. Out-of-bounds is a no-op.
    pub fn replace_at(&mut self, index: usize, record: R) -> bool {
        let replaced = self.inner.replace_at(index, record);
        if replaced {
            self.persist();
        }
        replaced
    }

    /// Removes the record at `index` and persists.
    pub fn remove_at(&mut self, index: usize) -> Option<R> {
        let removed = self.inner.remove_at(index);
        if removed.is_some() {
            self.persist();
        }
        removed
    }
}

impl<R> PersistentStore<R> {
    /// Returns the slot key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the records in order.
    #[must_use]
    pub fn records(&self) -> &[R] {
        self.inner.records()
    }

    /// Returns the record at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&R> {
        self.inner.get(index)
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<R: Serialize + DeserializeOwned> RecordSink<R> for PersistentStore<R> {
    fn append(&mut self, record: R) -> usize {
        PersistentStore::append(self, record)
    }

    fn replace_at(&mut self, index: usize, record: R) -> bool {
        PersistentStore::replace_at(self, index, record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    struct Item {
        name: String,
    }

    fn item(name: &str) -> Item {
        Item {
            name: name.to_string(),
        }
    }

    #[test]
    fn test_append_keeps_order_and_duplicates() {
        let mut store = RecordStore::new();
        assert_eq!(store.append("a"), 0);
        assert_eq!(store.append("b"), 1);
        assert_eq!(store.append("a"), 2);
        assert_eq!(store.records(), &["a", "b", "a"]);
    }

    #[test]
    fn test_replace_out_of_bounds_is_noop() {
        let mut store = RecordStore::from_records(vec!["a"]);
        assert!(!store.replace_at(1, "x"));
        assert_eq!(store.records(), &["a"]);
        assert!(store.replace_at(0, "x"));
        assert_eq!(store.records(), &["x"]);
    }

    #[test]
    fn test_remove_shifts_down() {
        let mut store = RecordStore::from_records(vec!["a", "b", "c", "d"]);
        assert_eq!(store.remove_at(1), Some("b"));
        assert_eq!(store.records(), &["a", "c", "d"]);
        assert_eq!(store.remove_at(3), None);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_load_absent_uses_and_writes_seed() {
        let port = Arc::new(MemoryStore::new());
        let store = PersistentStore::load(port.clone(), "items", vec![item("seed")]);

        assert_eq!(store.records(), &[item("seed")]);
        assert_eq!(port.raw("items").as_deref(), Some(r#"[{"name":"seed"}]"#));
    }

    #[test]
    fn test_load_malformed_uses_seed() {
        for blob in ["not json", "{}", r#"[{"nom":"x"}]"#, "[1,2]"] {
            let port = Arc::new(MemoryStore::with_blob("items", blob));
            let store = PersistentStore::load(port, "items", vec![item("seed")]);
            assert_eq!(store.records(), &[item("seed")], "blob {blob:?}");
        }
    }

    #[test]
    fn test_load_empty_array_is_empty_list() {
        let port = Arc::new(MemoryStore::with_blob("items", "[]"));
        let store = PersistentStore::load(port, "items", vec![item("seed")]);
        assert!(store.is_empty());
    }

    #[test]
    fn test_mutations_persist() {
        let port = Arc::new(MemoryStore::new());
        let mut store = PersistentStore::load(port.clone(), "items", Vec::<Item>::new());

        store.append(item("a"));
        store.append(item("b"));
        store.replace_at(0, item("A"));
        store.remove_at(1);

        let reloaded = PersistentStore::load(port, "items", vec![item("seed")]);
        assert_eq!(reloaded.records(), &[item("A")]);
    }

    #[test]
    fn test_write_failures_are_swallowed() {
        let port = Arc::new(MemoryStore::with_blob("items", "[]"));
        let mut store = PersistentStore::load(port.clone(), "items", Vec::<Item>::new());
        port.set_fail_writes(true);

        store.append(item("a"));
        assert_eq!(store.len(), 1);
        assert!(store.save().is_err());
        assert_eq!(port.raw("items").as_deref(), Some("[]"));
    }
}
