//! Error types for querylog-engine
//!
//! Provides unified error handling across the crate.

use querylog_storage::StorageError;
use thiserror::Error;

use crate::config::ConfigError;

/// Main error type for result tracking and log rendering
#[derive(Debug, Error)]
pub enum QueryLogError {
    /// Persisted-state read/write failure
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Stored result set or log document does not have the expected shape
    #[error("Malformed results: {0}")]
    MalformedResults(String),

    /// A log item pass had neither differential nor snapshot rows
    #[error("No differential or snapshot results")]
    NoResults,

    /// JSON encode/decode error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl QueryLogError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        QueryLogError::MalformedResults(msg.into())
    }
}

/// Result type alias for querylog operations
pub type Result<T> = std::result::Result<T, QueryLogError>;
