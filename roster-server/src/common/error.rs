//! Unified Error Handling
//!
//! The distribution service is the error boundary: store-level failures are
//! logged and converted here, and the presentation layer never sees a raw
//! surrealdb error.

use thiserror::Error;

use crate::db::ShardSetError;
use crate::db::repository::RepoError;
use crate::db::router::RouteError;

/// Service-boundary error type
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepoError> for ServiceError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => ServiceError::NotFound(msg),
            RepoError::Duplicate(msg) => ServiceError::Duplicate(msg),
            RepoError::Validation(msg) => ServiceError::Validation(msg),
            RepoError::Database(msg) => ServiceError::Store(msg),
        }
    }
}

impl From<RouteError> for ServiceError {
    // Out-of-range ids fail validation before any store is contacted
    fn from(err: RouteError) -> Self {
        ServiceError::Validation(err.to_string())
    }
}

impl From<ShardSetError> for ServiceError {
    fn from(err: ShardSetError) -> Self {
        ServiceError::Store(err.to_string())
    }
}

impl From<argon2::password_hash::Error> for ServiceError {
    fn from(err: argon2::password_hash::Error) -> Self {
        ServiceError::Internal(format!("Failed to hash password: {err}"))
    }
}
