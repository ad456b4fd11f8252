//! Add-form binding and validation.
//!
//! `EmployeeForm` is what the registration form posts. It is validated
//! with `validator` before an id is attached and it becomes an `Employee`.
//! Only the first failing field is reported, checked in the order
//! name, email, phone, salary.

use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};
use workfolio_state::{Employee, EmployeeId};

use crate::error::{ServiceError, ServiceResult};

/// Order in which field errors are reported.
const FIELD_ORDER: [&str; 4] = ["name", "email", "phone", "salary"];

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct EmployeeForm {
    #[validate(
        required(message = "Name should not be null"),
        custom(function = "not_blank", message = "Invalid Employee Name"),
        length(
            min = 2,
            max = 50,
            message = "Name should consist of a minimum of 2 characters and a maximum of 50 characters."
        )
    )]
    pub name: Option<String>,

    pub address: Option<String>,

    #[validate(
        required(message = "email should not be null"),
        custom(function = "not_blank", message = "Invalid Employee Email"),
        email(message = "Invalid Email")
    )]
    pub email: Option<String>,

    #[validate(
        required(message = "Employee number should not be null"),
        custom(function = "not_blank", message = "Invalid Employee Number"),
        length(equal = 10, message = "please provide a valid phone number without country code")
    )]
    pub phone: Option<String>,

    // A floor of 5000 also rules out non-positive salaries. `inf` and
    // `NaN` parse as f64 and slip past a min-only range.
    #[validate(
        required(message = "Employee salary should not be null"),
        custom(function = "finite", message = "Salary must be a positive value"),
        range(min = 5000.0, message = "Salary must be at least 5000")
    )]
    pub salary: Option<f64>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn finite(value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::new("finite"));
    }
    Ok(())
}

/// Message of the first failing field, in [`FIELD_ORDER`].
fn first_message(errors: &ValidationErrors) -> String {
    let fields = errors.field_errors();
    FIELD_ORDER
        .iter()
        .filter_map(|field| fields.get(*field))
        .filter_map(|errs| errs.first())
        .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| errors.to_string())
}

impl EmployeeForm {
    /// Validate the form and attach `id`, producing a storable record.
    pub fn into_employee(self, id: EmployeeId) -> ServiceResult<Employee> {
        self.validate()
            .map_err(|errors| ServiceError::ValidationFailed(first_message(&errors)))?;

        // `validate` guarantees presence of every required field.
        match (self.name, self.email, self.phone, self.salary) {
            (Some(name), Some(email), Some(phone), Some(salary)) => Ok(Employee {
                id,
                name,
                address: self.address,
                email,
                phone,
                salary,
            }),
            _ => Err(ServiceError::ValidationFailed(
                "required field missing".to_string(),
            )),
        }
    }
}
