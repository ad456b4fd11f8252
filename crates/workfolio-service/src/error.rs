//! Error types for the employee service.

use thiserror::Error;
use workfolio_state::{EmployeeId, StateError};

/// Result type alias for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced by [`crate::EmployeeService`].
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("the employee already present with that id")]
    DuplicateId(EmployeeId),

    #[error("the employee already present with that email")]
    DuplicateEmail(String),

    #[error("no employee found with that id : {0}")]
    NotFound(EmployeeId),

    /// First failing field's message from add-form validation.
    #[error("{0}")]
    ValidationFailed(String),

    /// A text field was absent when trimming.
    #[error("cannot trim absent field `{0}`")]
    MissingField(&'static str),

    #[error(transparent)]
    Store(#[from] StateError),
}
