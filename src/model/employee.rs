//! Employee model.

use serde::Serialize;

super::row_id! {
    /// Row id of an employee, assigned by the store on registration.
    EmployeeId
}

/// A registered employee.
///
/// Employees are created once and never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
}

impl Employee {
    /// Normalize a display name for registration.
    ///
    /// Returns `None` when nothing but whitespace was entered.
    #[must_use]
    pub fn normalize_name(raw: &str) -> Option<String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}
