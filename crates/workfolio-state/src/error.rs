//! Error types for the employee store.

use thiserror::Error;

/// Result type alias for store operations.
pub type StateResult<T> = Result<T, StateError>;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("failed to open database: {0}")]
    Open(String),

    #[error("transaction error: {0}")]
    Transaction(String),

    #[error("table error: {0}")]
    Table(String),

    #[error("read error: {0}")]
    Read(String),

    #[error("write error: {0}")]
    Write(String),

    #[error("serialization error: {0}")]
    Serialize(String),

    #[error("deserialization error: {0}")]
    Deserialize(String),

    /// Unique-email constraint violation raised inside a write transaction.
    #[error("duplicate key: email {email} already belongs to employee {owner}")]
    EmailTaken { email: String, owner: i32 },

    #[error("{0}")]
    InvalidPage(String),

    /// JSON has no representation for `inf` or `NaN`; such a row could not
    /// be read back.
    #[error("salary of employee {id} is not a finite number")]
    NonFiniteSalary { id: i32 },
}
