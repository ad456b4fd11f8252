//! workfolio-state — embedded employee store for WorkFolio.
//!
//! Backed by [redb](https://docs.rs/redb), provides persistent and in-memory
//! storage for employee records keyed by their integer id.
//!
//! # Architecture
//!
//! Employees are JSON-serialized into redb's `&[u8]` value column of the
//! `employees` table. A second table, `employee_emails`, maps each email to
//! the id that owns it and backs the unique-email constraint.
//!
//! The `EmployeeStore` is `Clone` + `Send` + `Sync` (backed by `Arc<Database>`)
//! and can be shared across async tasks.

pub mod error;
pub mod store;
pub mod tables;
pub mod types;

pub use error::{StateError, StateResult};
pub use store::EmployeeStore;
pub use types::*;
