//! Department enumeration

use thiserror::Error;

/// Fixed set of departments an employee can belong to.
///
/// Each member has a short code (used in forms and in the `employees.department`
/// column) and a human readable label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Department {
    HumanResources,
    Engineering,
    Sales,
    Marketing,
    Finance,
    ItSupport,
}

/// Returned when a department code is not one of the known codes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown department code: {0:?}")]
pub struct UnknownDepartment(pub String);

impl Department {
    /// All departments in display order.
    pub const ALL: [Department; 6] = [
        Department::HumanResources,
        Department::Engineering,
        Department::Sales,
        Department::Marketing,
        Department::Finance,
        Department::ItSupport,
    ];

    /// Code stored in the database and submitted by forms.
    pub fn code(self) -> &'static str {
        match self {
            Department::HumanResources => "HR",
            Department::Engineering => "ENGINEERING",
            Department::Sales => "SALES",
            Department::Marketing => "MARKETING",
            Department::Finance => "FINANCE",
            Department::ItSupport => "IT",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Department::HumanResources => "Human Resources",
            Department::Engineering => "Engineering",
            Department::Sales => "Sales",
            Department::Marketing => "Marketing",
            Department::Finance => "Finance",
            Department::ItSupport => "IT Support",
        }
    }

    /// Parse a department code. Codes are matched exactly.
    pub fn from_code(code: &str) -> Result<Self, UnknownDepartment> {
        Self::ALL
            .into_iter()
            .find(|d| d.code() == code)
            .ok_or_else(|| UnknownDepartment(code.to_string()))
    }
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
