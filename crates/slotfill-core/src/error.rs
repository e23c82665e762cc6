//! Core error types for slotfill-core.
//!
//! Only malformed input is an error. A task that fits nowhere is reported
//! as unplaced data, never through this hierarchy.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for slotfill-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Malformed engine input
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
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

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Malformed-input errors. Each names the offending record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A time-of-day string is not `HH:MM` within 00:00..=23:59
    #[error("Invalid time '{value}' in {record}: expected HH:MM between 00:00 and 23:59")]
    InvalidTime { record: String, value: String },

    /// Task duration is zero or negative
    #[error("Task '{task_id}' has non-positive duration ({minutes} minutes)")]
    NonPositiveDuration { task_id: String, minutes: i64 },

    /// Commitment dates are inconsistent
    #[error("Commitment '{commitment_id}' has an invalid date range: {message}")]
    InvalidDateRange {
        commitment_id: String,
        message: String,
    },

    /// Same task id used twice
    #[error("Duplicate task id '{0}'")]
    DuplicateTaskId(String),

    /// Horizon must span at least one day
    #[error("Horizon must cover at least one day (got {days})")]
    EmptyHorizon { days: i64 },

    /// Window end must be after window start
    #[error("Invalid day window: end ({end}) must be after start ({start})")]
    InvalidWindow { start: String, end: String },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_name_the_record() {
        let err = ValidationError::NonPositiveDuration {
            task_id: "write-report".into(),
            minutes: 0,
        };
        assert!(err.to_string().contains("write-report"));

        let err = ValidationError::InvalidTime {
            record: "commitment 'gym'".into(),
            value: "25:00".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("gym"));
        assert!(msg.contains("25:00"));
    }

    #[test]
    fn validation_converts_into_core_error() {
        let err: CoreError = ValidationError::DuplicateTaskId("t1".into()).into();
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(
            err.to_string(),
            "Validation error: Duplicate task id 't1'"
        );
    }
}
