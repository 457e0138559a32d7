//! Core error types for attune-core.
//!
//! The engine functions only ever fail with [`ValidationError`]; the host
//! layers (planner, storage) wrap it in [`CoreError`] together with their own
//! I/O and configuration failures.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for attune-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// No task with the given id exists in the store
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    /// The timeline cursor is past the last slot
    #[error("No active task: the timeline is empty or every slot has been completed")]
    NoActiveTask,

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
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

    /// Key does not name a configuration field
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors.
///
/// These are the only errors the scheduling engine itself produces. An empty
/// task list is never one of them: it yields an empty result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A task violates its data invariants (zero estimate, out-of-range scores)
    #[error("Invalid task '{id}': {message}")]
    InvalidTask { id: String, message: String },

    /// Invalid time range
    #[error("Invalid time range: end_time ({end}) must be greater than start_time ({start})")]
    InvalidTimeRange {
        start: chrono::DateTime<chrono::FixedOffset>,
        end: chrono::DateTime<chrono::FixedOffset>,
    },

    /// Out of bounds
    #[error("Index {index} out of bounds for {collection} (length: {len})")]
    OutOfBounds {
        collection: String,
        index: usize,
        len: usize,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl ValidationError {
    pub(crate) fn timeline_index(index: usize, len: usize) -> Self {
        ValidationError::OutOfBounds {
            collection: "timeline".to_string(),
            index,
            len,
        }
    }
}

impl From<toml::ser::Error> for CoreError {
    fn from(err: toml::ser::Error) -> Self {
        CoreError::Config(ConfigError::ParseFailed(err.to_string()))
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
