use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Store-assigned member identifier.
pub type MemberId = u64;

/// Store-assigned course identifier.
pub type CourseId = u64;

/// Identifier carried by records that were never persisted.
pub const UNSAVED_ID: u64 = 0;

/// Reads an id set, treating any non-array value as empty.
///
/// Older snapshots may lack the field or hold `null`; those load as an empty
/// set. Array elements must still be non-negative integers.
pub(crate) fn lenient_id_set<'de, D>(deserializer: D) -> Result<Vec<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value::<u64>(item).map_err(D::Error::custom))
            .collect(),
        _ => Ok(Vec::new()),
    }
}

/// Reads a text field, treating `null` or any non-string value as empty.
pub(crate) fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        _ => Ok(String::new()),
    }
}
