//! Hierarchy engine error types

use shared::{PositionId, SharedError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HierarchyError {
    #[error("Validation failed: {message}")]
    ValidationError { message: String },

    #[error("Position not found: {id}")]
    NotFoundError { id: PositionId },

    #[error("Moving {id} under {new_parent_id} would create a cycle")]
    CycleError { id: PositionId, new_parent_id: PositionId },

    #[error("Hierarchy integrity violated: {message}")]
    IntegrityError { message: String },

    #[error("Persistence operation failed: {operation} ({message})")]
    PersistenceError { operation: String, message: String },

    #[error("Contact lookup failed: {message}")]
    ContactLookupError { message: String },

    #[error("Configuration error: {field} ({message})")]
    ConfigurationError { field: String, message: String },

    #[error("Network communication error: {message}")]
    NetworkError { message: String },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl HierarchyError {
    pub fn validation(message: impl Into<String>) -> Self {
        HierarchyError::ValidationError { message: message.into() }
    }

    pub fn not_found(id: &PositionId) -> Self {
        HierarchyError::NotFoundError { id: id.clone() }
    }

    pub fn integrity(message: impl Into<String>) -> Self {
        HierarchyError::IntegrityError { message: message.into() }
    }

    /// Stale references and transport failures can succeed after a refresh
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            HierarchyError::NotFoundError { .. } | HierarchyError::NetworkError { .. }
        )
    }
}

impl From<SharedError> for HierarchyError {
    fn from(err: SharedError) -> Self {
        match err {
            SharedError::SerializationError { message } => HierarchyError::PersistenceError {
                operation: "serialize".to_string(),
                message,
            },
            SharedError::DeserializationError { message } => HierarchyError::PersistenceError {
                operation: "deserialize".to_string(),
                message,
            },
            other => HierarchyError::ValidationError { message: other.to_string() },
        }
    }
}

pub type HierarchyResult<T> = Result<T, HierarchyError>;
