//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Covers failures while building catalogs and taxonomies. Ledger operations
/// have their own error type because most of their failures are recoverable
/// and reported as booleans.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. an empty name or an out-of-range field).
    #[error("validation failed: {0}")]
    Validation(String),

    /// Something with the same identifying name was already defined.
    #[error("duplicate definition: {0}")]
    DuplicateDefinition(String),

    /// A reference (parent category, item type, accepted type) could not be resolved.
    #[error("unknown reference: {0}")]
    UnknownReference(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn duplicate(msg: impl Into<String>) -> Self {
        Self::DuplicateDefinition(msg.into())
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self::UnknownReference(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }
}
