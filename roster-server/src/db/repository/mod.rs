//! Repository Module
//!
//! Single-shard CRUD for the five collections. Every function operates
//! against one shard handle the caller picked; placement decisions live in
//! the distribution service, never here.

// Accounts
pub mod user;

// Organization
pub mod department;
pub mod employee;

// Employee-owned records
pub mod leave;
pub mod salary;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
