//! History error types.

use std::path::PathBuf;

/// Errors that can occur during history operations.
#[derive(thiserror::Error, Debug)]
pub enum HistoryError {
    /// Failed to open or create database.
    #[error("Failed to open database at {path}: {source}")]
    DatabaseOpen {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Failed to execute SQL.
    #[error("Database query failed: {0}")]
    Query(#[from] rusqlite::Error),

    /// Failed to serialize or deserialize a JSON column.
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A stored row could not be decoded.
    #[error("Invalid history record {id}: {reason}")]
    InvalidRecord { id: i64, reason: String },

    /// Blocking task was cancelled.
    #[error("Blocking task cancelled")]
    TaskCancelled,

    /// Failed to create parent directory.
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_open_display() {
        let err = HistoryError::DatabaseOpen {
            path: PathBuf::from("/tmp/history.db"),
            source: rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(1),
                Some("test".to_string()),
            ),
        };
        assert!(err.to_string().contains("Failed to open database"));
        assert!(err.to_string().contains("/tmp/history.db"));
    }

    #[test]
    fn test_invalid_record_display() {
        let err = HistoryError::InvalidRecord {
            id: 7,
            reason: "Unknown scenario: draw".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid history record 7: Unknown scenario: draw"
        );
    }

    #[test]
    fn test_task_cancelled_display() {
        assert_eq!(HistoryError::TaskCancelled.to_string(), "Blocking task cancelled");
    }
}
