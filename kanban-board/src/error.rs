//! Error types for board operations

use kanban_position::PositionError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for board operations
pub type Result<T> = std::result::Result<T, BoardError>;

/// Errors that can occur in board operations
#[derive(Debug, Error)]
pub enum BoardError {
    /// Storage root does not exist
    #[error("board storage not initialized at {path}")]
    NotInitialized { path: PathBuf },

    /// Board, list or card not found
    #[error("{resource} not found: {id}")]
    NotFound { resource: String, id: String },

    /// List still has cards and cannot be deleted
    #[error("list '{id}' has {count} cards and cannot be deleted")]
    ListNotEmpty { id: String, count: usize },

    /// Invalid field value
    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// Position allocation failed
    #[error(transparent)]
    Position(#[from] PositionError),

    /// A freshly rebalanced group still had no usable gap
    #[error("{resource} group under '{parent}' still inconsistent after rebalance: {source}")]
    Inconsistent {
        resource: String,
        parent: String,
        source: PositionError,
    },

    /// Lock is held by another process
    #[error("lock busy - another operation in progress")]
    LockBusy,

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BoardError {
    /// Create a not found error
    pub fn not_found(resource: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id: id.to_string(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Check if this is a retryable error
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::LockBusy)
    }
}

impl From<figment::Error> for BoardError {
    fn from(error: figment::Error) -> Self {
        Self::Config(Box::new(error))
    }
}
