//! Partial-update input and the per-field merge policy.
//!
//! An update never fails on a field value. Each entry of
//! [`UPDATE_POLICIES`] decides whether its field is eligible; ineligible
//! fields keep the stored value and the rest of the update still applies.
//!
//! | Field | Applied when |
//! |---|---|
//! | address | present (empty string included) |
//! | salary | `5000 < salary < 200000` |
//! | name | present |
//! | email | present and no stored record owns it |
//! | phone | present and exactly 10 characters |

use serde::{Deserialize, Serialize};
use workfolio_state::{Employee, EmployeeId};

use crate::error::{ServiceError, ServiceResult};

/// Exclusive lower bound for an accepted salary update.
pub const SALARY_UPDATE_FLOOR: f64 = 5000.0;

/// Exclusive upper bound for an accepted salary update.
pub const SALARY_UPDATE_CEILING: f64 = 200000.0;

pub const PHONE_LENGTH: usize = 10;

/// Incoming update. Only `id` is mandatory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    pub id: EmployeeId,
    pub name: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub salary: Option<f64>,
}

impl From<Employee> for EmployeeUpdate {
    fn from(e: Employee) -> Self {
        Self {
            id: e.id,
            name: Some(e.name),
            address: e.address,
            email: Some(e.email),
            phone: Some(e.phone),
            salary: Some(e.salary),
        }
    }
}

impl EmployeeUpdate {
    /// Strip surrounding whitespace from name, address, email and phone.
    ///
    /// Every one of the four must be present; the first absent one is
    /// reported as [`ServiceError::MissingField`] and nothing is trimmed.
    pub fn trim_properties(&mut self) -> ServiceResult<()> {
        let fields = [
            ("address", &self.address),
            ("email", &self.email),
            ("name", &self.name),
            ("phone", &self.phone),
        ];
        if let Some((field, _)) = fields.iter().find(|(_, value)| value.is_none()) {
            return Err(ServiceError::MissingField(*field));
        }

        for value in [
            &mut self.address,
            &mut self.email,
            &mut self.name,
            &mut self.phone,
        ]
        .into_iter()
        .flatten()
        {
            *value = value.trim().to_string();
        }
        Ok(())
    }
}

/// Facts about the store that policies need but cannot look up themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeContext {
    /// No stored record currently holds the incoming email.
    pub email_available: bool,
}

/// One row of the merge policy table.
pub struct FieldPolicy {
    pub field: &'static str,
    pub eligible: fn(&EmployeeUpdate, &MergeContext) -> bool,
    pub apply: fn(&mut Employee, &EmployeeUpdate),
}

pub static UPDATE_POLICIES: [FieldPolicy; 5] = [
    FieldPolicy {
        field: "address",
        eligible: |u, _| u.address.is_some(),
        apply: |e, u| e.address = u.address.clone(),
    },
    FieldPolicy {
        field: "salary",
        eligible: |u, _| {
            u.salary
                .is_some_and(|s| s > SALARY_UPDATE_FLOOR && s < SALARY_UPDATE_CEILING)
        },
        apply: |e, u| {
            if let Some(salary) = u.salary {
                e.salary = salary;
            }
        },
    },
    FieldPolicy {
        field: "name",
        eligible: |u, _| u.name.is_some(),
        apply: |e, u| {
            if let Some(name) = &u.name {
                e.name = name.clone();
            }
        },
    },
    FieldPolicy {
        field: "email",
        eligible: |u, ctx| u.email.is_some() && ctx.email_available,
        apply: |e, u| {
            if let Some(email) = &u.email {
                e.email = email.clone();
            }
        },
    },
    FieldPolicy {
        field: "phone",
        eligible: |u, _| {
            u.phone
                .as_ref()
                .is_some_and(|p| p.chars().count() == PHONE_LENGTH)
        },
        apply: |e, u| {
            if let Some(phone) = &u.phone {
                e.phone = phone.clone();
            }
        },
    },
];

/// Apply every eligible policy to `target`. Returns the skipped field names.
pub fn merge(
    target: &mut Employee,
    update: &EmployeeUpdate,
    ctx: &MergeContext,
) -> Vec<&'static str> {
    let mut skipped = Vec::new();
    for policy in &UPDATE_POLICIES {
        if (policy.eligible)(update, ctx) {
            (policy.apply)(target, update);
        } else {
            skipped.push(policy.field);
        }
    }
    skipped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> Employee {
        Employee {
            id: 1,
            name: "Meera".to_string(),
            address: Some("Chennai".to_string()),
            email: "meera@example.com".to_string(),
            phone: "9000000001".to_string(),
            salary: 30000.0,
        }
    }

    fn update() -> EmployeeUpdate {
        EmployeeUpdate {
            id: 1,
            ..Default::default()
        }
    }

    const FREE_EMAIL: MergeContext = MergeContext {
        email_available: true,
    };

    #[test]
    fn empty_update_changes_nothing() {
        let mut emp = stored();
        let skipped = merge(&mut emp, &update(), &FREE_EMAIL);
        assert_eq!(emp, stored());
        assert_eq!(skipped, vec!["address", "salary", "name", "email", "phone"]);
    }

    #[test]
    fn salary_bounds_are_exclusive() {
        for (salary, expected) in [
            (5000.0, 30000.0),
            (5000.5, 5000.5),
            (199999.0, 199999.0),
            (200000.0, 30000.0),
            (300000.0, 30000.0),
            (-1.0, 30000.0),
        ] {
            let mut emp = stored();
            let u = EmployeeUpdate {
                salary: Some(salary),
                ..update()
            };
            merge(&mut emp, &u, &FREE_EMAIL);
            assert_eq!(emp.salary, expected, "salary update {salary}");
        }
    }

    #[test]
    fn empty_address_replaces() {
        let mut emp = stored();
        let u = EmployeeUpdate {
            address: Some(String::new()),
            ..update()
        };
        merge(&mut emp, &u, &FREE_EMAIL);
        assert_eq!(emp.address.as_deref(), Some(""));
    }

    #[test]
    fn phone_requires_ten_characters() {
        let mut emp = stored();
        let u = EmployeeUpdate {
            phone: Some("12345".to_string()),
            ..update()
        };
        merge(&mut emp, &u, &FREE_EMAIL);
        assert_eq!(emp.phone, "9000000001");

        let u = EmployeeUpdate {
            phone: Some("9111111111".to_string()),
            ..update()
        };
        merge(&mut emp, &u, &FREE_EMAIL);
        assert_eq!(emp.phone, "9111111111");
    }

    #[test]
    fn taken_email_is_skipped() {
        let mut emp = stored();
        let u = EmployeeUpdate {
            email: Some("other@example.com".to_string()),
            name: Some("Meera S".to_string()),
            ..update()
        };
        let skipped = merge(&mut emp, &u, &MergeContext::default());
        assert_eq!(emp.email, "meera@example.com");
        assert_eq!(emp.name, "Meera S");
        assert!(skipped.contains(&"email"));
    }

    #[test]
    fn trim_strips_whitespace() {
        let mut u = EmployeeUpdate::from(stored());
        u.name = Some("  Meera ".to_string());
        u.email = Some(" meera@example.com\t".to_string());
        u.trim_properties().unwrap();
        assert_eq!(u.name.as_deref(), Some("Meera"));
        assert_eq!(u.email.as_deref(), Some("meera@example.com"));
    }

    #[test]
    fn trim_rejects_absent_field() {
        let mut u = EmployeeUpdate::from(Employee {
            address: None,
            ..stored()
        });
        let err = u.trim_properties().unwrap_err();
        assert!(matches!(err, ServiceError::MissingField("address")));

        let mut partial = EmployeeUpdate {
            name: Some(" x ".to_string()),
            ..update()
        };
        assert!(partial.trim_properties().is_err());
        assert_eq!(partial.name.as_deref(), Some(" x "));
    }
}
