//! Domain types for the employee store.
//!
//! `Employee` is the only persisted entity. `Page` is the windowed result
//! of a paginated scan.

use serde::{Deserialize, Serialize};

/// Primary key of an employee record. Caller-supplied, never generated here.
pub type EmployeeId = i32;

// ── Employee ───────────────────────────────────────────────────────

/// A single employee record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    /// Free-form postal address, optional.
    pub address: Option<String>,
    /// Globally unique across the table.
    pub email: String,
    pub phone: String,
    pub salary: f64,
}

// ── Page ───────────────────────────────────────────────────────────

/// One window of a paginated scan, in primary-key order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Zero-based page index that was requested.
    pub number: u64,
    /// Requested page size.
    pub size: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Build a page, deriving `total_pages` as `ceil(total_items / size)`.
    pub fn new(items: Vec<T>, number: u64, size: u64, total_items: u64) -> Self {
        let total_pages = if size == 0 {
            0
        } else {
            total_items.div_ceil(size)
        };
        Self {
            items,
            number,
            size,
            total_items,
            total_pages,
        }
    }

    pub fn is_first(&self) -> bool {
        self.number == 0
    }

    pub fn is_last(&self) -> bool {
        !self.has_next()
    }

    pub fn has_next(&self) -> bool {
        self.number + 1 < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 0
    }
}
