//! # Store Error Types
//!
//! Error types for entity store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  Business rule (pdv-core CoreError)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds reference / uniqueness failures        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in pdv-server) ← Status code + {message}                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Client displays the message                                            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use pdv_core::{CoreError, ValidationError};
use thiserror::Error;

/// Entity store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Unique constraint violation.
    ///
    /// ## When This Occurs
    /// - Creating a user with a username that is already taken
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// A record references an id that does not exist.
    ///
    /// ## When This Occurs
    /// - Sale / cash transaction / closing with an unknown `operatorId`
    /// - Product with an unknown `categoryId`
    #[error("Foreign key violation: {field} {id} does not exist")]
    ForeignKeyViolation { field: String, id: i64 },

    /// A business rule rejected the operation (register closing).
    #[error(transparent)]
    Domain(#[from] CoreError),
}

impl StoreError {
    /// Creates a UniqueViolation error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        StoreError::UniqueViolation {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Creates a ForeignKeyViolation error.
    pub fn dangling(field: impl Into<String>, id: i64) -> Self {
        StoreError::ForeignKeyViolation {
            field: field.into(),
            id,
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::Domain(CoreError::Validation(err))
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
