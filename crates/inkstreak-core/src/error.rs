//! Core error types for inkstreak-core.
//!
//! The streak engine, the storage envelope and the configuration layer each
//! have their own thiserror enum; `CoreError` wraps them for callers that
//! deal with more than one layer at a time.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for inkstreak-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Streak computation errors
    #[error("Streak error: {0}")]
    Streak(#[from] StreakError),

    /// Persisted day-status errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by the streak engine.
///
/// Every variant aborts the whole computation; no partial report is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StreakError {
    /// The records argument was not a sequence
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A date (including `today`) failed normalization
    #[error("Invalid date for {label}: {reason}")]
    InvalidDate { label: String, reason: String },

    /// A record did not have the `{date, ...}` shape
    #[error("Malformed day status at index {index}: {reason}")]
    MalformedRecord { index: usize, reason: String },
}

impl StreakError {
    pub(crate) fn invalid_date(label: &str, reason: impl Into<String>) -> Self {
        StreakError::InvalidDate {
            label: label.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while reading or writing the persisted envelope.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Stored text is not JSON
    #[error("Invalid JSON format: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// Top-level value is not an object
    #[error("Invalid storage format: not an object")]
    NotAnObject,

    /// `version` is missing or not a number
    #[error("Invalid storage format: missing or invalid version")]
    MissingVersion,

    /// Envelope written by an incompatible version
    #[error("Version mismatch: expected {expected}, got {found}")]
    VersionMismatch { expected: u32, found: String },

    /// `data` key is absent
    #[error("Invalid storage format: missing data")]
    MissingData,

    /// `data` is not a map of valid day statuses
    #[error("Invalid storage format: invalid data structure")]
    InvalidData,

    /// Failed to encode the envelope
    #[error("Failed to serialize day statuses: {0}")]
    Encode(#[source] serde_json::Error),

    /// Underlying file operation failed
    #[error("Storage I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    /// True when the stored payload itself is unusable (as opposed to the
    /// medium failing). Callers degrade these to an empty history.
    pub fn is_corrupt(&self) -> bool {
        !matches!(self, StorageError::Io { .. } | StorageError::Encode(_))
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
