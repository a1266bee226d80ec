//! Runtime configuration for roster binaries.
//!
//! Values come from `ROSTER_*` environment variables; anything unset falls
//! back to the constants below.

use crate::logging::{default_log_level, normalize_level, normalize_log_dir, LoggingError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_VAR: &str = "ROSTER_DB_PATH";
pub const LOG_LEVEL_VAR: &str = "ROSTER_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "ROSTER_LOG_DIR";
pub const DEFAULT_DB_FILE_NAME: &str = "roster.sqlite3";

#[derive(Debug)]
pub enum ConfigError {
    EmptyValue(&'static str),
    Logging(LoggingError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyValue(var) => write!(f, "`{var}` is set but empty"),
            Self::Logging(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Logging(err) => Some(err),
            Self::EmptyValue(_) => None,
        }
    }
}

impl From<LoggingError> for ConfigError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}

/// Resolved settings for one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterConfig {
    pub db_path: PathBuf,
    pub log_level: &'static str,
    /// `None` leaves file logging off.
    pub log_dir: Option<PathBuf>,
}

impl RosterConfig {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Reads settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let db_path = match lookup(DB_PATH_VAR) {
            Some(value) if value.trim().is_empty() => {
                return Err(ConfigError::EmptyValue(DB_PATH_VAR))
            }
            Some(value) => PathBuf::from(value.trim()),
            None => PathBuf::from(DEFAULT_DB_FILE_NAME),
        };

        let log_level = match lookup(LOG_LEVEL_VAR) {
            Some(value) => normalize_level(&value)?,
            None => default_log_level(),
        };

        let log_dir = match lookup(LOG_DIR_VAR) {
            Some(value) if value.trim().is_empty() => None,
            Some(value) => Some(normalize_log_dir(PathBuf::from(value.trim()).as_path())?),
            None => None,
        };

        Ok(Self {
            db_path,
            log_level,
            log_dir,
        })
    }
}
