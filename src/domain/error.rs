//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent tree-model contract violations.
///
/// The model has a single failure class: an operation was requested in a
/// state that does not allow it (removing with nothing selected, addressing a
/// node or collection whose handle no longer refers to anything).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
}

impl DomainError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        DomainError::InvalidOperation(reason.into())
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
