//! String-keyed blob storage used to persist roster collections.
//!
//! # Responsibility
//! - Define the `Storage` seam that stores load from and save to.
//! - Provide a SQLite-backed implementation and an in-memory one.
//!
//! # Invariants
//! - A missing key is `Ok(None)`, never an error.
//! - `set_item` fully replaces the previous value of a key.
//! - `set_items` is all-or-nothing on backends that support transactions.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure reading or writing the persistence layer.
#[derive(Debug)]
pub enum StorageError {
    /// Underlying SQLite failure.
    Db(DbError),
    /// Connection schema is not at the version this build expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is absent from an otherwise migrated connection.
    MissingRequiredTable(&'static str),
    /// Backend refused the operation (quota, closed handle, injected fault).
    Unavailable(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "storage requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "storage requires table `{table}`")
            }
            Self::Unavailable(reason) => write!(f, "storage unavailable: {reason}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Key/value persistence contract consumed by the roster stores.
pub trait Storage {
    /// Reads the blob stored under `key`.
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replaces the blob stored under `key`.
    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Writes several keys together.
    ///
    /// The default writes them one by one in order; transactional backends
    /// override this to commit all entries or none.
    fn set_items(&self, entries: &[(&str, &str)]) -> StorageResult<()> {
        for (key, value) in entries {
            self.set_item(key, value)?;
        }
        Ok(())
    }
}

impl<T: Storage + ?Sized> Storage for &T {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set_item(key, value)
    }

    fn set_items(&self, entries: &[(&str, &str)]) -> StorageResult<()> {
        (**self).set_items(entries)
    }
}
