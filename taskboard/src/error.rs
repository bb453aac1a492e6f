//! Error types for the task board engine

use thiserror::Error;

/// Result type for board operations
pub type Result<T> = std::result::Result<T, BoardError>;

/// Errors that can occur in board operations
///
/// Routine interaction outcomes (a drop outside any target, navigation past a
/// boundary, deleting an id that is already gone) are not errors and never
/// produce one of these.
#[derive(Debug, Error)]
pub enum BoardError {
    /// Column not found
    #[error("column not found: {id}")]
    ColumnNotFound { id: String },

    /// Task not found
    #[error("task not found: {id}")]
    TaskNotFound { id: String },

    /// Title is empty after trimming
    #[error("title cannot be empty")]
    EmptyTitle,

    /// Blob store rejected a read or write
    #[error("storage error for '{key}': {message}")]
    Storage { key: String, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BoardError {
    /// Create a column-not-found error
    pub fn column_not_found(id: impl Into<String>) -> Self {
        Self::ColumnNotFound { id: id.into() }
    }

    /// Create a task-not-found error
    pub fn task_not_found(id: impl Into<String>) -> Self {
        Self::TaskNotFound { id: id.into() }
    }

    /// Create a storage error
    pub fn storage(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Storage {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Check if this error reports a missing entity
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ColumnNotFound { .. } | Self::TaskNotFound { .. })
    }
}
