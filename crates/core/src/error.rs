//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic business failures (validation,
/// missing entities, quantity shortfalls). Storage concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (malformed input or a business-rule breach).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A requested entity does not exist (domain-level).
    #[error("not found: {0}")]
    NotFound(String),

    /// A purchase asked for more units than the listing has left.
    #[error("insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u64, available: u64 },

    /// A draw asked for more units than the user currently owns.
    #[error("insufficient owned units: requested {requested}, owned {owned}")]
    InsufficientOwnedUnits { requested: u64, owned: u64 },
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }
}
