//! Generic JSON-array collection shared by the member and course stores.
//!
//! # Invariants
//! - The whole working set is re-encoded on every persist.
//! - `next_id` is never lower than `max(id) + 1` and never decreases.
//! - Every persist writes the collection and its counter in one `set_items`
//!   call, so an id handed out by a failed insert is never handed out again.

use super::{RepoError, RepoResult, WriteOutcome};
use crate::model::course::Course;
use crate::model::member::Member;
use crate::storage::Storage;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Record shape the collection engine needs.
pub(crate) trait Record: Serialize + DeserializeOwned {
    fn id(&self) -> u64;
    fn set_id(&mut self, id: u64);
    /// Ids of records in the other collection this one links to.
    fn links(&self) -> &[u64];
    fn links_mut(&mut self) -> &mut Vec<u64>;
}

impl Record for Member {
    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn links(&self) -> &[u64] {
        &self.courses
    }

    fn links_mut(&mut self) -> &mut Vec<u64> {
        &mut self.courses
    }
}

impl Record for Course {
    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn links(&self) -> &[u64] {
        &self.participants
    }

    fn links_mut(&mut self) -> &mut Vec<u64> {
        &mut self.participants
    }
}

/// Storage keys owned by one collection.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CollectionKeys {
    pub items: &'static str,
    pub next_id: &'static str,
}

pub(crate) struct JsonCollection<T, S> {
    storage: S,
    keys: CollectionKeys,
    items: Vec<T>,
    next_id: u64,
    unflushed: bool,
}

impl<T: Record, S: Storage> JsonCollection<T, S> {
    /// Loads the working set and id counter from `storage`.
    pub fn load(storage: S, keys: CollectionKeys) -> RepoResult<Self> {
        let items: Vec<T> = match storage.get_item(keys.items)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|err| RepoError::InvalidData {
                key: keys.items,
                message: err.to_string(),
            })?,
            None => Vec::new(),
        };

        let stored_next_id = match storage.get_item(keys.next_id)? {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|_| {
                RepoError::InvalidData {
                    key: keys.next_id,
                    message: format!("expected an unsigned integer, got `{raw}`"),
                }
            })?),
            None => None,
        };
        // Snapshots written before the counter existed resume after the max id.
        let max_id = items.iter().map(Record::id).max().unwrap_or(0);
        let after_max = max_id.checked_add(1).ok_or_else(|| RepoError::InvalidData {
            key: keys.items,
            message: format!("id `{max_id}` leaves no room for another record"),
        })?;
        let next_id = stored_next_id.unwrap_or(1).max(after_max);

        debug!(
            "event=collection_load module=repo status=ok key={} count={} next_id={}",
            keys.items,
            items.len(),
            next_id
        );

        Ok(Self {
            storage,
            keys,
            items,
            next_id,
            unflushed: false,
        })
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn get(&self, id: u64) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Assigns the next id to `record`, appends it and persists.
    pub fn insert(&mut self, mut record: T) -> RepoResult<u64> {
        let id = self.next_id;
        self.next_id = id.checked_add(1).ok_or_else(|| RepoError::InvalidData {
            key: self.keys.next_id,
            message: format!("id counter `{id}` is exhausted"),
        })?;
        record.set_id(id);
        self.items.push(record);

        self.persist()?;
        Ok(id)
    }

    /// Replaces the record with `id`. Persists even when nothing matched.
    pub fn replace(&mut self, id: u64, mut record: T) -> RepoResult<WriteOutcome> {
        record.set_id(id);
        let outcome = match self.items.iter_mut().find(|item| item.id() == id) {
            Some(slot) => {
                *slot = record;
                WriteOutcome::Applied
            }
            None => WriteOutcome::NotFound,
        };
        self.persist()?;
        Ok(outcome)
    }

    /// Removes the record with `id`. Persists even when nothing matched.
    pub fn remove(&mut self, id: u64) -> RepoResult<WriteOutcome> {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        let outcome = if self.items.len() < before {
            WriteOutcome::Applied
        } else {
            WriteOutcome::NotFound
        };
        self.persist()?;
        Ok(outcome)
    }

    /// Adds `link` to the record with `id` unless already present.
    ///
    /// Writes only when the set changed, or when an earlier write failed and
    /// the working set still has to reach storage.
    pub fn add_link(&mut self, id: u64, link: u64) -> RepoResult<WriteOutcome> {
        let Some(record) = self.items.iter_mut().find(|item| item.id() == id) else {
            return Ok(WriteOutcome::NotFound);
        };
        if record.links().contains(&link) {
            self.flush_pending()?;
            return Ok(WriteOutcome::Unchanged);
        }
        record.links_mut().push(link);
        self.persist()?;
        Ok(WriteOutcome::Applied)
    }

    /// Strips `link` from every record; returns how many records changed.
    pub fn remove_link_everywhere(&mut self, link: u64) -> RepoResult<usize> {
        let mut changed = 0;
        for record in &mut self.items {
            let links = record.links_mut();
            let before = links.len();
            links.retain(|candidate| *candidate != link);
            if links.len() < before {
                changed += 1;
            }
        }
        if changed > 0 {
            self.persist()?;
        } else {
            self.flush_pending()?;
        }
        Ok(changed)
    }

    /// Whether the working set holds changes storage has not accepted yet.
    pub fn has_unflushed_changes(&self) -> bool {
        self.unflushed
    }

    fn flush_pending(&mut self) -> RepoResult<()> {
        if self.unflushed {
            self.persist()?;
        }
        Ok(())
    }

    fn persist(&mut self) -> RepoResult<()> {
        let encoded = serde_json::to_string(&self.items).map_err(RepoError::Encode)?;
        let counter = self.next_id.to_string();
        let entries = [
            (self.keys.items, encoded.as_str()),
            (self.keys.next_id, counter.as_str()),
        ];

        match self.storage.set_items(&entries) {
            Ok(()) => {
                self.unflushed = false;
                debug!(
                    "event=collection_persist module=repo status=ok key={} count={}",
                    self.keys.items,
                    self.items.len()
                );
                Ok(())
            }
            Err(err) => {
                self.unflushed = true;
                warn!(
                    "event=collection_persist module=repo status=error key={} error={}",
                    self.keys.items, err
                );
                Err(err.into())
            }
        }
    }
}
