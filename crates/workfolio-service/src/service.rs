//! EmployeeService — the business rules around `EmployeeStore`.
//!
//! Existence and uniqueness checks run as separate store reads ahead of
//! the write. They are not atomic with it: two concurrent adds may both
//! pass, and the loser then fails inside the store with
//! `StateError::EmailTaken` or silently overwrites by id. Concurrent
//! updates of one id can likewise lose an update.

use tracing::{debug, info};
use workfolio_state::{Employee, EmployeeId, EmployeeStore, Page};

use crate::error::{ServiceError, ServiceResult};
use crate::patch::{EmployeeUpdate, MergeContext, merge};

/// Shared, cloneable handle over the employee store.
#[derive(Clone)]
pub struct EmployeeService {
    store: EmployeeStore,
}

impl EmployeeService {
    pub fn new(store: EmployeeStore) -> Self {
        Self { store }
    }

    /// Insert a new employee. The id check runs before the email check.
    pub fn add_employee(&self, employee: &Employee) -> ServiceResult<()> {
        if self.store.find_by_id(employee.id)?.is_some() {
            return Err(ServiceError::DuplicateId(employee.id));
        }
        if self.store.find_by_email(&employee.email)?.is_some() {
            return Err(ServiceError::DuplicateEmail(employee.email.clone()));
        }
        self.store.save(employee)?;
        info!(id = employee.id, "employee added");
        Ok(())
    }

    pub fn get_all_employees(&self) -> ServiceResult<Vec<Employee>> {
        Ok(self.store.find_all()?)
    }

    pub fn get_employee_by_id(&self, id: EmployeeId) -> ServiceResult<Employee> {
        self.store
            .find_by_id(id)?
            .ok_or(ServiceError::NotFound(id))
    }

    pub fn delete_employee(&self, id: EmployeeId) -> ServiceResult<()> {
        if self.store.find_by_id(id)?.is_none() {
            return Err(ServiceError::NotFound(id));
        }
        self.store.delete_by_id(id)?;
        info!(id, "employee deleted");
        Ok(())
    }

    /// Page through employees. Arguments go to the store unchecked.
    pub fn get_employees_by_page(
        &self,
        page_index: i64,
        size: i64,
    ) -> ServiceResult<Page<Employee>> {
        Ok(self.store.find_page(page_index, size)?)
    }

    /// Merge `update` into the stored record and save it.
    ///
    /// Fields that fail their policy are left as stored; see
    /// [`crate::patch`]. Returns the record as saved.
    pub fn update_employee(&self, update: &EmployeeUpdate) -> ServiceResult<Employee> {
        let mut employee = self
            .store
            .find_by_id(update.id)?
            .ok_or(ServiceError::NotFound(update.id))?;

        let email_available = match &update.email {
            Some(email) => self.store.find_by_email(email)?.is_none(),
            None => false,
        };
        let ctx = MergeContext { email_available };

        let skipped = merge(&mut employee, update, &ctx);
        if !skipped.is_empty() {
            debug!(id = update.id, ?skipped, "update fields left unchanged");
        }

        self.store.save(&employee)?;
        info!(id = employee.id, "employee updated");
        Ok(employee)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use workfolio_state::StateError;

    fn service() -> EmployeeService {
        EmployeeService::new(EmployeeStore::open_in_memory().unwrap())
    }

    fn employee(id: EmployeeId, email: &str) -> Employee {
        Employee {
            id,
            name: "Kiran".to_string(),
            address: Some("Delhi".to_string()),
            email: email.to_string(),
            phone: "9898989898".to_string(),
            salary: 6000.0,
        }
    }

    // ── Add / get ──────────────────────────────────────────────────

    #[test]
    fn add_then_get_returns_same_record() {
        let svc = service();
        let emp = employee(10, "a@x.com");
        svc.add_employee(&emp).unwrap();
        assert_eq!(svc.get_employee_by_id(10).unwrap(), emp);
    }

    #[test]
    fn add_duplicate_id_fails() {
        let svc = service();
        svc.add_employee(&employee(10, "a@x.com")).unwrap();
        let err = svc.add_employee(&employee(10, "b@x.com")).unwrap_err();
        assert!(matches!(err, ServiceError::DuplicateId(10)));
    }

    #[test]
    fn add_duplicate_email_fails() {
        let svc = service();
        svc.add_employee(&employee(10, "a@x.com")).unwrap();
        let err = svc.add_employee(&employee(11, "a@x.com")).unwrap_err();
        assert!(matches!(err, ServiceError::DuplicateEmail(ref e) if e == "a@x.com"));
    }

    #[test]
    fn id_check_precedes_email_check() {
        let svc = service();
        svc.add_employee(&employee(10, "a@x.com")).unwrap();
        let err = svc.add_employee(&employee(10, "a@x.com")).unwrap_err();
        assert!(matches!(err, ServiceError::DuplicateId(10)));
    }

    #[test]
    fn get_missing_is_not_found() {
        let err = service().get_employee_by_id(3).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(3)));
        assert_eq!(err.to_string(), "no employee found with that id : 3");
    }

    #[test]
    fn get_all_lists_everything() {
        let svc = service();
        svc.add_employee(&employee(2, "b@x.com")).unwrap();
        svc.add_employee(&employee(1, "a@x.com")).unwrap();
        assert_eq!(svc.get_all_employees().unwrap().len(), 2);
    }

    // ── Delete ─────────────────────────────────────────────────────

    #[test]
    fn delete_then_get_is_not_found() {
        let svc = service();
        svc.add_employee(&employee(4, "d@x.com")).unwrap();
        svc.delete_employee(4).unwrap();
        assert!(matches!(
            svc.get_employee_by_id(4),
            Err(ServiceError::NotFound(4))
        ));
        assert!(matches!(
            svc.delete_employee(4),
            Err(ServiceError::NotFound(4))
        ));
    }

    // ── Pagination ─────────────────────────────────────────────────

    #[test]
    fn paginate_five_employees() {
        let svc = service();
        for id in 1..=5 {
            svc.add_employee(&employee(id, &format!("e{id}@x.com")))
                .unwrap();
        }

        let first = svc.get_employees_by_page(0, 2).unwrap();
        assert_eq!(first.items.len(), 2);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.total_items, 5);

        let last = svc.get_employees_by_page(2, 2).unwrap();
        assert_eq!(last.items.len(), 1);
        assert_eq!(last.items[0].id, 5);
        assert_eq!(last.total_pages, 3);
        assert_eq!(last.total_items, 5);
    }

    #[test]
    fn negative_page_passes_through_to_store() {
        let err = service().get_employees_by_page(-1, 2).unwrap_err();
        assert!(matches!(err, ServiceError::Store(StateError::InvalidPage(_))));
    }

    // ── Update ─────────────────────────────────────────────────────

    #[test]
    fn update_missing_is_not_found() {
        let update = EmployeeUpdate {
            id: 77,
            ..Default::default()
        };
        assert!(matches!(
            service().update_employee(&update),
            Err(ServiceError::NotFound(77))
        ));
    }

    #[test]
    fn out_of_range_salary_is_dropped() {
        let svc = service();
        svc.add_employee(&employee(1, "a@x.com")).unwrap();

        let update = EmployeeUpdate {
            id: 1,
            salary: Some(300000.0),
            ..Default::default()
        };
        svc.update_employee(&update).unwrap();
        assert_eq!(svc.get_employee_by_id(1).unwrap().salary, 6000.0);

        let update = EmployeeUpdate {
            id: 1,
            salary: Some(50000.0),
            ..Default::default()
        };
        svc.update_employee(&update).unwrap();
        assert_eq!(svc.get_employee_by_id(1).unwrap().salary, 50000.0);
    }

    #[test]
    fn phone_length_gates_update() {
        let svc = service();
        svc.add_employee(&employee(1, "a@x.com")).unwrap();

        let update = EmployeeUpdate {
            id: 1,
            phone: Some("123".to_string()),
            ..Default::default()
        };
        svc.update_employee(&update).unwrap();
        assert_eq!(svc.get_employee_by_id(1).unwrap().phone, "9898989898");

        let update = EmployeeUpdate {
            id: 1,
            phone: Some("1234567890".to_string()),
            ..Default::default()
        };
        svc.update_employee(&update).unwrap();
        assert_eq!(svc.get_employee_by_id(1).unwrap().phone, "1234567890");
    }

    #[test]
    fn email_owned_by_other_record_is_left_unchanged() {
        let svc = service();
        svc.add_employee(&employee(1, "a@x.com")).unwrap();
        svc.add_employee(&employee(2, "b@x.com")).unwrap();

        let update = EmployeeUpdate {
            id: 1,
            email: Some("b@x.com".to_string()),
            name: Some("Renamed".to_string()),
            ..Default::default()
        };
        let saved = svc.update_employee(&update).unwrap();
        assert_eq!(saved.email, "a@x.com");
        assert_eq!(saved.name, "Renamed");
    }

    #[test]
    fn free_email_is_applied() {
        let svc = service();
        svc.add_employee(&employee(1, "a@x.com")).unwrap();

        let update = EmployeeUpdate {
            id: 1,
            email: Some("fresh@x.com".to_string()),
            ..Default::default()
        };
        svc.update_employee(&update).unwrap();
        assert_eq!(svc.get_employee_by_id(1).unwrap().email, "fresh@x.com");
        assert!(svc.add_employee(&employee(9, "a@x.com")).is_ok());
    }

    #[test]
    fn resaving_fetched_record_is_a_no_op() {
        let svc = service();
        let emp = employee(1, "a@x.com");
        svc.add_employee(&emp).unwrap();

        let mut update = EmployeeUpdate::from(svc.get_employee_by_id(1).unwrap());
        update.trim_properties().unwrap();
        svc.update_employee(&update).unwrap();
        assert_eq!(svc.get_employee_by_id(1).unwrap(), emp);
    }
}
