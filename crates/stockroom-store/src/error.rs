//! # Store Error Types
//!
//! Error types for document store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error / CoreError                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds context and categorization            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (apps/api) ← Status code + { "error": ... }                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use stockroom_core::CoreError;
use thiserror::Error;

/// Document store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity not found in its document.
    ///
    /// ## When This Occurs
    /// - Account has no collection of that kind
    /// - Record id doesn't exist in the account's collection
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique value already taken.
    ///
    /// ## When This Occurs
    /// - Registering a username that already exists
    #[error("Duplicate {field}: '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// Reading or writing a document failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A document could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Password hashing failed.
    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    /// Business rule failure raised while mutating a document.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a Duplicate error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        StoreError::Duplicate {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Convenience type alias for Results with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            StoreError::not_found("Product", "p1").to_string(),
            "Product not found: p1"
        );
        assert_eq!(
            StoreError::duplicate("username", "ana").to_string(),
            "Duplicate username: 'ana' already exists"
        );
    }

    #[test]
    fn test_core_error_is_transparent() {
        let err: StoreError = CoreError::ClientNotFound("c1".to_string()).into();
        assert_eq!(err.to_string(), "Client not found: c1");
    }
}
