//! Shared error types for the org chart hierarchy engine

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SharedError {
    #[error("Unknown department: {input}")]
    InvalidDepartment { input: String },

    #[error("Level must be between 1 and 5, got {value}")]
    InvalidLevel { value: i64 },

    #[error("Title must not be empty")]
    EmptyTitle,

    #[error("Invalid identifier: {input:?}")]
    InvalidId { input: String },

    #[error("Serialization failed: {message}")]
    SerializationError { message: String },

    #[error("Deserialization failed: {message}")]
    DeserializationError { message: String },
}

pub type SharedResult<T> = Result<T, SharedError>;
