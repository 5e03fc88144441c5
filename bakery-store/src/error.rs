//! Error types and result types for document store operations.
//!
//! Use [`StoreResult<T>`] as the return type for fallible store operations.

use bson::error::Error as BsonError;
use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// Represents all possible errors that can occur when interacting with a document store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Serialization/deserialization error when converting between document formats (BSON, JSON).
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Error during store initialization or connection setup.
    #[error("Initialization error: {0}")]
    Initialization(String),
    /// The document has an invalid structure (e.g. it is not a mapping).
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
    /// An error occurred in the underlying storage backend.
    #[error("Backend error: {0}")]
    Backend(String),
    /// No store is configured or the store could not be initialized.
    #[error("Database not available: {0}")]
    Unavailable(String),
}

/// A specialized `Result` type for document store operations.
pub type StoreResult<T> = Result<T, StoreError>;

impl From<BsonError> for StoreError {
    fn from(err: BsonError) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

impl From<SerdeJsonError> for StoreError {
    fn from(err: SerdeJsonError) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_json_errors_become_serialization_errors() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();

        assert!(matches!(StoreError::from(err), StoreError::Serialization(_)));
    }

    #[test]
    fn unavailable_message_names_the_reason() {
        let err = StoreError::Unavailable("DATABASE_URL is not set".to_string());

        assert_eq!(err.to_string(), "Database not available: DATABASE_URL is not set");
    }
}
