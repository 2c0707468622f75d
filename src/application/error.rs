//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("no visible row at position {position} ({visible} row(s) shown)")]
    UnknownRow { position: usize, visible: usize },

    #[error("config error: {message}")]
    Config { message: String },
}

impl ApplicationError {
    /// True for the remove-without-selection / stale-handle class of errors.
    pub fn is_invalid_operation(&self) -> bool {
        matches!(
            self,
            ApplicationError::Domain(DomainError::InvalidOperation(_))
        )
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
