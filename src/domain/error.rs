//! Domain errors

use thiserror::Error;

/// Domain-level error types.
///
/// Absence of a row is not an error: lookups return `Option` / `bool`
/// instead, since "resource does not exist" is an expected outcome.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Malformed or missing required input
    #[error("Validation: {0}")]
    Validation(String),

    /// Uniqueness violation surfaced by the store
    #[error("Already exists: {0}")]
    Conflict(String),

    /// The store cannot be reached or the query failed
    #[error("Database error: {0}")]
    Database(String),
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
