//! In-process [`Storage`] used by tests and dry runs.

use super::{Storage, StorageResult};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// Single-threaded key/value map with the same semantics as `SqliteStorage`.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds storage with raw blobs, e.g. a legacy snapshot.
    pub fn with_items<K, V>(items: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let items = items
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self {
            items: RefCell::new(items),
        }
    }

    /// Returns a copy of every stored blob.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.items.borrow().clone()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryStorage;
    use crate::storage::Storage;

    #[test]
    fn seeded_items_are_readable() {
        let storage = MemoryStorage::with_items([("members", "[]")]);
        assert_eq!(storage.get_item("members").unwrap().as_deref(), Some("[]"));
        assert_eq!(storage.get_item("courses").unwrap(), None);
    }

    #[test]
    fn shared_reference_writes_are_visible_to_owner() {
        let storage = MemoryStorage::new();
        let handle = &storage;
        handle.set_items(&[("a", "1"), ("b", "2")]).unwrap();
        assert_eq!(storage.snapshot().len(), 2);
    }
}
