//! Custom error types for opsdesk
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for opsdesk operations
#[derive(Error, Debug)]
pub enum OpsdeskError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for request payloads
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Authentication and credential errors
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Backup storage errors (snapshot directories and artifacts)
    #[error("Storage error: {0}")]
    Storage(String),
}

impl OpsdeskError {
    /// Create a "not found" error for snapshots
    pub fn snapshot_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Snapshot",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for work orders
    pub fn work_order_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Work order",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for OpsdeskError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for OpsdeskError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for opsdesk operations
pub type OpsdeskResult<T> = Result<T, OpsdeskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = OpsdeskError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = OpsdeskError::snapshot_not_found("backup_20240101_000000");
        assert_eq!(err.to_string(), "Snapshot not found: backup_20240101_000000");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let opsdesk_err: OpsdeskError = io_err.into();
        assert!(matches!(opsdesk_err, OpsdeskError::Io(_)));
    }
}
