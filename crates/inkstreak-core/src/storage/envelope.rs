//! Versioned JSON envelope for persisted day statuses.
//!
//! On disk the collection looks like:
//!
//! ```json
//! { "version": 1, "data": { "2024-06-05": { "date": "2024-06-05", "written": true, "published": false } } }
//! ```
//!
//! Anything else (bad JSON, another version, loosely typed flags) is
//! rejected with a [`StorageError`] so callers can fall back to an empty
//! history.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StorageError;
use crate::streak::DayRecord;

/// Current envelope version.
pub const STORAGE_VERSION: u32 = 1;

/// Fixed key the collection is stored under.
pub const STORAGE_KEY: &str = "dayStatuses";

/// Persisted activity for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayStatus {
    pub date: String,
    pub written: bool,
    pub published: bool,
}

impl DayStatus {
    pub fn new(date: impl Into<String>, written: bool, published: bool) -> Self {
        Self {
            date: date.into(),
            written,
            published,
        }
    }
}

impl From<&DayStatus> for DayRecord {
    fn from(status: &DayStatus) -> Self {
        DayRecord::new(status.date.as_str(), status.written, status.published)
    }
}

/// Day statuses keyed by date key.
pub type DayStatusMap = BTreeMap<String, DayStatus>;

#[derive(Serialize)]
struct Envelope<'a> {
    version: u32,
    data: &'a DayStatusMap,
}

/// Wrap `data` in the current envelope.
pub fn serialize(data: &DayStatusMap) -> Result<String, StorageError> {
    serde_json::to_string_pretty(&Envelope {
        version: STORAGE_VERSION,
        data,
    })
    .map_err(StorageError::Encode)
}

/// Unwrap and validate an envelope.
pub fn deserialize(json: &str) -> Result<DayStatusMap, StorageError> {
    let parsed: Value = serde_json::from_str(json).map_err(StorageError::InvalidJson)?;
    let envelope = parsed.as_object().ok_or(StorageError::NotAnObject)?;

    let version = envelope.get("version").ok_or(StorageError::MissingVersion)?;
    let number = version.as_f64().ok_or(StorageError::MissingVersion)?;
    if number != f64::from(STORAGE_VERSION) {
        return Err(StorageError::VersionMismatch {
            expected: STORAGE_VERSION,
            found: version.to_string(),
        });
    }

    let data = envelope.get("data").ok_or(StorageError::MissingData)?;
    if !is_valid_day_status_map(data) {
        return Err(StorageError::InvalidData);
    }
    serde_json::from_value(data.clone()).map_err(|_| StorageError::InvalidData)
}

/// Strict shape check: string date, boolean flags.
pub fn is_valid_day_status(value: &Value) -> bool {
    let Some(fields) = value.as_object() else {
        return false;
    };
    fields.get("date").is_some_and(Value::is_string)
        && fields.get("written").is_some_and(Value::is_boolean)
        && fields.get("published").is_some_and(Value::is_boolean)
}

/// An object whose every value passes [`is_valid_day_status`].
pub fn is_valid_day_status_map(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|map| map.values().all(is_valid_day_status))
}
