//! Domain and storage error models.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Result type returned by storage ports.
pub type StoreResult<T> = Result<T, StoreError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// malformed identifiers, missing records). Infrastructure concerns belong in
/// [`StoreError`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value or a combination of values failed validation (e.g. totals that
    /// do not add up, ambiguous filters).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. wrong prefix, parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested resource was not found.
    #[error("{0} not found")]
    NotFound(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }
}

/// Storage operation error.
///
/// These are **infrastructure errors** raised by storage adapters, as opposed
/// to domain errors. They are logged by the application layer and never shown
/// to callers verbatim.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness or integrity constraint rejected the write.
    #[error("storage conflict: {0}")]
    Conflict(String),

    /// The write was rejected before reaching the backend (e.g. a reference
    /// to a record that was never persisted).
    #[error("invalid write: {0}")]
    InvalidWrite(String),

    /// The backend failed (connection loss, SQL error, poisoned lock, ...).
    #[error("storage backend failure: {0}")]
    Backend(String),

    /// A stored record could not be mapped back into the domain model.
    #[error("corrupt record: {0}")]
    Corrupt(String),

    /// Beginning, committing or rolling back a unit of work failed.
    #[error("transaction failure: {0}")]
    Transaction(String),
}

impl StoreError {
    pub fn invalid_write(msg: impl Into<String>) -> Self {
        Self::InvalidWrite(msg.into())
    }

    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    pub fn corrupt(msg: impl Into<String>) -> Self {
        Self::Corrupt(msg.into())
    }
}
