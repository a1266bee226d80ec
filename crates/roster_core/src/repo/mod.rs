//! Member and course stores.
//!
//! # Responsibility
//! - Own the in-memory working sets and write them back on every mutation.
//! - Report missing ids as a `WriteOutcome`, never as an error.
//!
//! # Invariants
//! - Collections are loaded once, when a store is constructed.
//! - Assigned ids are strictly increasing and never reused.
//! - A failed write leaves the mutation in memory; the next write flushes it.

mod collection;
pub mod course_repo;
pub mod member_repo;

use crate::storage::StorageError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors raised by the roster stores.
#[derive(Debug)]
pub enum RepoError {
    /// Backing storage could not be read or written.
    Storage(StorageError),
    /// A persisted blob could not be decoded.
    InvalidData { key: &'static str, message: String },
    /// A working set could not be encoded for persistence.
    Encode(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::InvalidData { key, message } => {
                write!(f, "invalid persisted data under `{key}`: {message}")
            }
            Self::Encode(err) => write!(f, "failed to encode collection: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::InvalidData { .. } => None,
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<StorageError> for RepoError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// What a targeted write actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The working set changed.
    Applied,
    /// Target exists and already had the requested state.
    Unchanged,
    /// No record has the requested id.
    NotFound,
}

impl WriteOutcome {
    pub fn is_applied(self) -> bool {
        self == Self::Applied
    }

    pub fn is_not_found(self) -> bool {
        self == Self::NotFound
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::Unchanged => "unchanged",
            Self::NotFound => "not_found",
        }
    }
}
