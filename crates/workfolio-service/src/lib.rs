//! workfolio-service — business rules around the employee store.
//!
//! The store is a plain keyed table; this crate owns everything
//! conditional: uniqueness checks on insert, existence checks on
//! read/update/delete, add-form validation, and the field-by-field
//! partial-update policy.

pub mod error;
pub mod form;
pub mod patch;
pub mod service;

pub use error::{ServiceError, ServiceResult};
pub use form::EmployeeForm;
pub use patch::{EmployeeUpdate, FieldPolicy, MergeContext, UPDATE_POLICIES};
pub use service::EmployeeService;
