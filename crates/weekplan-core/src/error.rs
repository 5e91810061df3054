//! Core error types for weekplan-core.
//!
//! Follows a small hierarchy built on thiserror: scheduling input errors,
//! configuration errors, and an umbrella [`CoreError`] for the storage layer
//! and the CLI.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for weekplan-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Structurally invalid scheduling input
    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Failed to read or write an input/output file
    #[error("Failed to access {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

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

/// Errors raised for input the allocator cannot work with.
///
/// Running out of room for a task is not one of these; unplaced tasks are a
/// regular outcome reported through [`crate::WeekPlan::unplaced`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Fixed block that would corrupt the grid
    #[error("Invalid fixed block '{block}': {reason}")]
    InvalidBlock { block: String, reason: String },

    /// Clock time not in zero-padded HH:MM form or out of range
    #[error("Invalid clock time '{0}': expected zero-padded HH:MM between 00:00 and 24:00")]
    InvalidTime(String),

    /// Day of week outside 0 (Sunday) ..= 6 (Saturday)
    #[error("Invalid day of week {0}: expected 0 (Sunday) to 6 (Saturday)")]
    InvalidDay(u8),

    /// Task that reached the allocator without passing eligibility
    #[error("Task '{task}' cannot be allocated: {reason}")]
    InvalidTask { task: String, reason: String },

    /// Grid settings that cannot produce a slot grid
    #[error("Invalid grid configuration: {0}")]
    InvalidGrid(String),
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

    /// Key that does not exist in the configuration
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

impl ScheduleError {
    pub(crate) fn invalid_block(block: &str, reason: impl Into<String>) -> Self {
        ScheduleError::InvalidBlock {
            block: block.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
