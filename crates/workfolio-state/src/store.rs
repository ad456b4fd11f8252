//! EmployeeStore — redb-backed persistence for employee records.
//!
//! Provides typed lookups, scans, and full-replace writes over the
//! `employees` table, and keeps the `employee_emails` unique index in step
//! with every write. The store supports both on-disk and in-memory
//! backends (the latter for testing).

use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableDatabase, ReadableTable, ReadableTableMetadata};
use tracing::debug;

use crate::error::{StateError, StateResult};
use crate::tables::*;
use crate::types::*;

/// Convert any `Display` error into a `StateError` variant via a closure factory.
macro_rules! map_err {
    ($variant:ident) => {
        |e| StateError::$variant(e.to_string())
    };
}

/// Thread-safe employee store backed by redb.
#[derive(Clone)]
pub struct EmployeeStore {
    db: Arc<Database>,
}

impl EmployeeStore {
    /// Open (or create) a persistent store at the given path.
    pub fn open(path: &Path) -> StateResult<Self> {
        let db = Database::create(path).map_err(map_err!(Open))?;
        let store = Self { db: Arc::new(db) };
        store.ensure_tables()?;
        debug!(?path, "employee store opened");
        Ok(store)
    }

    /// Create an ephemeral in-memory store (for testing).
    pub fn open_in_memory() -> StateResult<Self> {
        let backend = redb::backends::InMemoryBackend::new();
        let db = Database::builder()
            .create_with_backend(backend)
            .map_err(map_err!(Open))?;
        let store = Self { db: Arc::new(db) };
        store.ensure_tables()?;
        debug!("in-memory employee store opened");
        Ok(store)
    }

    fn ensure_tables(&self) -> StateResult<()> {
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        // Opening a table in a write transaction creates it if absent.
        txn.open_table(EMPLOYEES).map_err(map_err!(Table))?;
        txn.open_table(EMPLOYEE_EMAILS).map_err(map_err!(Table))?;
        txn.commit().map_err(map_err!(Transaction))?;
        Ok(())
    }

    // ── Lookups ────────────────────────────────────────────────────

    /// Get an employee by id. A miss is `Ok(None)`.
    pub fn find_by_id(&self, id: EmployeeId) -> StateResult<Option<Employee>> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(EMPLOYEES).map_err(map_err!(Table))?;
        match table.get(id).map_err(map_err!(Read))? {
            Some(guard) => {
                let employee: Employee =
                    serde_json::from_slice(guard.value()).map_err(map_err!(Deserialize))?;
                Ok(Some(employee))
            }
            None => Ok(None),
        }
    }

    /// Get the employee that owns `email`. A miss is `Ok(None)`.
    pub fn find_by_email(&self, email: &str) -> StateResult<Option<Employee>> {
        let owner = {
            let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
            let emails = txn.open_table(EMPLOYEE_EMAILS).map_err(map_err!(Table))?;
            let owner = emails
                .get(email)
                .map_err(map_err!(Read))?
                .map(|guard| guard.value());
            owner
        };
        match owner {
            Some(id) => self.find_by_id(id),
            None => Ok(None),
        }
    }

    /// Number of stored employees.
    pub fn count(&self) -> StateResult<u64> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(EMPLOYEES).map_err(map_err!(Table))?;
        table.len().map_err(map_err!(Read))
    }

    // ── Scans ──────────────────────────────────────────────────────

    /// List every employee in primary-key order.
    pub fn find_all(&self) -> StateResult<Vec<Employee>> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(EMPLOYEES).map_err(map_err!(Table))?;
        let mut results = Vec::new();
        for entry in table.iter().map_err(map_err!(Read))? {
            let (_, value) = entry.map_err(map_err!(Read))?;
            let employee: Employee =
                serde_json::from_slice(value.value()).map_err(map_err!(Deserialize))?;
            results.push(employee);
        }
        Ok(results)
    }

    /// Return the zero-based `page_index` window of `page_size` employees.
    ///
    /// Indexes past the end produce an empty page with correct totals.
    pub fn find_page(&self, page_index: i64, page_size: i64) -> StateResult<Page<Employee>> {
        if page_index < 0 {
            return Err(StateError::InvalidPage(
                "Page index must not be less than zero".to_string(),
            ));
        }
        if page_size < 1 {
            return Err(StateError::InvalidPage(
                "Page size must not be less than one".to_string(),
            ));
        }
        let (number, size) = (page_index as u64, page_size as u64);

        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(EMPLOYEES).map_err(map_err!(Table))?;
        let total = table.len().map_err(map_err!(Read))?;

        let mut items = Vec::new();
        if let Some(offset) = number.checked_mul(size).filter(|offset| *offset < total) {
            for entry in table
                .iter()
                .map_err(map_err!(Read))?
                .skip(offset as usize)
                .take(size as usize)
            {
                let (_, value) = entry.map_err(map_err!(Read))?;
                let employee: Employee =
                    serde_json::from_slice(value.value()).map_err(map_err!(Deserialize))?;
                items.push(employee);
            }
        }

        debug!(page = number, size, total, returned = items.len(), "page scanned");
        Ok(Page::new(items, number, size, total))
    }

    // ── Writes ─────────────────────────────────────────────────────

    /// Insert the employee, or fully replace the row with the same id.
    ///
    /// Fails with [`StateError::EmailTaken`] if another id owns the email,
    /// and with [`StateError::NonFiniteSalary`] for `inf` or `NaN`.
    pub fn save(&self, employee: &Employee) -> StateResult<()> {
        if !employee.salary.is_finite() {
            return Err(StateError::NonFiniteSalary { id: employee.id });
        }
        let value = serde_json::to_vec(employee).map_err(map_err!(Serialize))?;
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        {
            let mut table = txn.open_table(EMPLOYEES).map_err(map_err!(Table))?;
            let mut emails = txn.open_table(EMPLOYEE_EMAILS).map_err(map_err!(Table))?;

            let owner = emails
                .get(employee.email.as_str())
                .map_err(map_err!(Read))?
                .map(|guard| guard.value());
            if let Some(owner) = owner.filter(|owner| *owner != employee.id) {
                // Dropping the transaction uncommitted aborts it.
                return Err(StateError::EmailTaken {
                    email: employee.email.clone(),
                    owner,
                });
            }

            let previous: Option<Employee> = match table.get(employee.id).map_err(map_err!(Read))? {
                Some(guard) => {
                    Some(serde_json::from_slice(guard.value()).map_err(map_err!(Deserialize))?)
                }
                None => None,
            };
            if let Some(previous) = previous.filter(|p| p.email != employee.email) {
                emails
                    .remove(previous.email.as_str())
                    .map_err(map_err!(Write))?;
            }

            emails
                .insert(employee.email.as_str(), employee.id)
                .map_err(map_err!(Write))?;
            table
                .insert(employee.id, value.as_slice())
                .map_err(map_err!(Write))?;
        }
        txn.commit().map_err(map_err!(Transaction))?;
        debug!(id = employee.id, "employee stored");
        Ok(())
    }

    /// Delete an employee by id. Returns true if it existed.
    pub fn delete_by_id(&self, id: EmployeeId) -> StateResult<bool> {
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        let existed;
        {
            let mut table = txn.open_table(EMPLOYEES).map_err(map_err!(Table))?;
            let removed: Option<Employee> = match table.remove(id).map_err(map_err!(Write))? {
                Some(guard) => {
                    Some(serde_json::from_slice(guard.value()).map_err(map_err!(Deserialize))?)
                }
                None => None,
            };
            existed = removed.is_some();
            if let Some(employee) = removed {
                let mut emails = txn.open_table(EMPLOYEE_EMAILS).map_err(map_err!(Table))?;
                emails
                    .remove(employee.email.as_str())
                    .map_err(map_err!(Write))?;
            }
        }
        txn.commit().map_err(map_err!(Transaction))?;
        debug!(id, existed, "employee deleted");
        Ok(existed)
    }
}
