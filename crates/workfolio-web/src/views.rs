//! View types for template rendering.
//!
//! These carry pre-formatted strings so templates stay simple.

use serde::{Deserialize, Serialize};
use workfolio_service::EmployeeUpdate;
use workfolio_state::{Employee, EmployeeId, Page};

// ── Flash ───────────────────────────────────────────────────────

/// One-shot status message shown on the next rendered list.
///
/// Carried in the `flash` query parameter across redirects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flash {
    Added,
    Updated,
    Deleted,
}

impl Flash {
    pub fn message(self) -> &'static str {
        match self {
            Flash::Added => "Employee successfully added....",
            Flash::Updated => "Employee successfully updated....",
            Flash::Deleted => "Employee data deleted successfully...",
        }
    }

    pub fn query_value(self) -> &'static str {
        match self {
            Flash::Added => "added",
            Flash::Updated => "updated",
            Flash::Deleted => "deleted",
        }
    }
}

// ── Employee Row ────────────────────────────────────────────────

pub struct EmployeeRow {
    pub id: EmployeeId,
    pub name: String,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub salary: String,
}

impl EmployeeRow {
    pub fn from_employee(e: &Employee) -> Self {
        Self {
            id: e.id,
            name: e.name.clone(),
            address: e.address.clone().unwrap_or_default(),
            email: e.email.clone(),
            phone: e.phone.clone(),
            salary: format_salary(e.salary),
        }
    }

    pub fn from_update(u: &EmployeeUpdate) -> Self {
        Self {
            id: u.id,
            name: u.name.clone().unwrap_or_default(),
            address: u.address.clone().unwrap_or_default(),
            email: u.email.clone().unwrap_or_default(),
            phone: u.phone.clone().unwrap_or_default(),
            salary: u.salary.map(format_salary).unwrap_or_default(),
        }
    }
}

/// Plain decimal without a trailing `.0` for whole amounts.
pub fn format_salary(salary: f64) -> String {
    if salary.fract() == 0.0 {
        format!("{salary:.0}")
    } else {
        format!("{salary:.2}")
    }
}

// ── Pagination ──────────────────────────────────────────────────

pub struct PageLink {
    pub index: u64,
    pub label: String,
    pub current: bool,
}

pub struct PaginationView {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_items: u64,
    pub links: Vec<PageLink>,
    pub previous: Option<u64>,
    pub next: Option<u64>,
}

impl PaginationView {
    pub fn from_page<T>(page: &Page<T>) -> Self {
        let links = (0..page.total_pages)
            .map(|index| PageLink {
                index,
                label: (index + 1).to_string(),
                current: index == page.number,
            })
            .collect();
        Self {
            current_page: page.number,
            total_pages: page.total_pages,
            total_items: page.total_items,
            links,
            previous: page.has_previous().then(|| page.number - 1),
            next: page.has_next().then(|| page.number + 1),
        }
    }
}
