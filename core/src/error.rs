//! Error types for the store and the service.
//!
//! # Design
//! `ServiceError::NotFound` is produced in exactly one place: the service's
//! single-record lookup, which folds every store failure into it. All other
//! store failures pass through unchanged as `ServiceError::Store`.

use thiserror::Error;
use uuid::Uuid;

pub use sqlx::Error as SqlxError;

/// Errors returned by `TodoStore` implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No live (non-deleted) row has this id.
    #[error("could not find any todo matching id {0}")]
    NotFound(Uuid),

    /// The database rejected the statement or could not be reached.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Errors returned by `TodoService`.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The requested todo does not exist or has been soft-deleted.
    #[error("todo {id} not found: {reason}")]
    NotFound { id: Uuid, reason: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::NotFound { .. })
    }
}
