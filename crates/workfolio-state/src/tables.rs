//! redb table definitions for the employee store.

use redb::TableDefinition;

/// Employee records keyed by id, values are JSON-encoded `Employee`.
pub const EMPLOYEES: TableDefinition<i32, &[u8]> = TableDefinition::new("employees");

/// Unique email index: `{email}` -> owning employee id.
pub const EMPLOYEE_EMAILS: TableDefinition<&str, i32> = TableDefinition::new("employee_emails");
