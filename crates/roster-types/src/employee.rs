//! Employee types

use crate::Department;
use chrono::NaiveDate;
use serde::Deserialize;

pub const MAX_NAME_LEN: usize = 50;
pub const MAX_EMAIL_LEN: usize = 120;

/// Date format accepted by the hire date field.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A stored employee record
#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: Department,
    pub salary: f64,
    pub hire_date: NaiveDate,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Validated field set for hiring or editing an employee.
///
/// Holding a draft means every field already passed validation; the store
/// only has to enforce email uniqueness.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: Department,
    pub salary: f64,
    pub hire_date: NaiveDate,
}

impl EmployeeDraft {
    pub fn into_employee(self, id: i32) -> Employee {
        Employee {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            department: self.department,
            salary: self.salary,
            hire_date: self.hire_date,
        }
    }
}

/// A single rejected form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Raw employee form as submitted by the browser.
///
/// Every field is text; missing fields deserialize as empty strings so that
/// they surface as validation errors rather than extractor rejections.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EmployeeInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: String,
    pub salary: String,
    pub hire_date: String,
}

impl EmployeeInput {
    /// Prefill a form from a stored record.
    pub fn from_employee(employee: &Employee) -> Self {
        Self {
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            email: employee.email.clone(),
            department: employee.department.code().to_string(),
            salary: employee.salary.to_string(),
            hire_date: employee.hire_date.format(DATE_FORMAT).to_string(),
        }
    }

    /// Validate every field, collecting all failures.
    ///
    /// `today` is used when the hire date is left blank.
    pub fn validate(&self, today: NaiveDate) -> Result<EmployeeDraft, Vec<FieldError>> {
        let mut errors = Vec::new();

        let first_name = required_text("first_name", &self.first_name, MAX_NAME_LEN, &mut errors);
        let last_name = required_text("last_name", &self.last_name, MAX_NAME_LEN, &mut errors);
        let email = required_text("email", &self.email, MAX_EMAIL_LEN, &mut errors);
        if let Some(ref e) = email {
            if !e.contains('@') {
                errors.push(FieldError::new("email", "must be an email address"));
            }
        }

        let department = match Department::from_code(self.department.trim()) {
            Ok(d) => Some(d),
            Err(e) => {
                errors.push(FieldError::new("department", e.to_string()));
                None
            }
        };

        let salary = match parse_salary(&self.salary) {
            Ok(s) => Some(s),
            Err(e) => {
                errors.push(e);
                None
            }
        };

        let hire_date = match parse_hire_date(&self.hire_date, today) {
            Ok(d) => Some(d),
            Err(e) => {
                errors.push(e);
                None
            }
        };

        match (first_name, last_name, email, department, salary, hire_date) {
            (Some(first_name), Some(last_name), Some(email), Some(department), Some(salary), Some(hire_date))
                if errors.is_empty() =>
            {
                Ok(EmployeeDraft {
                    first_name,
                    last_name,
                    email,
                    department,
                    salary,
                    hire_date,
                })
            }
            _ => Err(errors),
        }
    }
}

fn required_text(
    field: &'static str,
    raw: &str,
    max_len: usize,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    let value = raw.trim();
    if value.is_empty() {
        errors.push(FieldError::new(field, "is required"));
        return None;
    }
    if value.chars().count() > max_len {
        errors.push(FieldError::new(
            field,
            format!("must be at most {} characters", max_len),
        ));
        return None;
    }
    Some(value.to_string())
}

/// Parse a non-negative, finite salary amount.
pub fn parse_salary(raw: &str) -> Result<f64, FieldError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| FieldError::new("salary", format!("{:?} is not a number", raw.trim())))?;
    if !value.is_finite() {
        return Err(FieldError::new("salary", "must be a finite amount"));
    }
    if value < 0.0 {
        return Err(FieldError::new("salary", "must not be negative"));
    }
    Ok(value)
}

/// Parse a `YYYY-MM-DD` hire date, defaulting to `today` when blank.
pub fn parse_hire_date(raw: &str, today: NaiveDate) -> Result<NaiveDate, FieldError> {
    let value = raw.trim();
    if value.is_empty() {
        return Ok(today);
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
        FieldError::new(
            "hire_date",
            format!("{:?} is not a date in YYYY-MM-DD format", value),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn ann() -> EmployeeInput {
        EmployeeInput {
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            email: "ann@x.com".to_string(),
            department: "ENGINEERING".to_string(),
            salary: "90000".to_string(),
            hire_date: "2024-01-15".to_string(),
        }
    }

    #[test]
    fn test_valid_input_becomes_draft() {
        let draft = ann().validate(today()).unwrap();
        assert_eq!(draft.first_name, "Ann");
        assert_eq!(draft.last_name, "Lee");
        assert_eq!(draft.email, "ann@x.com");
        assert_eq!(draft.department, Department::Engineering);
        assert_eq!(draft.salary, 90000.0);
        assert_eq!(draft.hire_date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn test_text_fields_are_trimmed() {
        let mut input = ann();
        input.first_name = "  Ann ".to_string();
        input.email = " ann@x.com\n".to_string();
        let draft = input.validate(today()).unwrap();
        assert_eq!(draft.first_name, "Ann");
        assert_eq!(draft.email, "ann@x.com");
    }

    #[test]
    fn test_blank_hire_date_defaults_to_today() {
        let mut input = ann();
        input.hire_date = String::new();
        assert_eq!(input.validate(today()).unwrap().hire_date, today());
    }

    #[test]
    fn test_unknown_department_is_rejected() {
        let mut input = ann();
        input.department = "LEGAL".to_string();
        let errors = input.validate(today()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "department");
    }

    #[test]
    fn test_all_failures_are_collected() {
        let input = EmployeeInput {
            first_name: String::new(),
            last_name: "x".repeat(MAX_NAME_LEN + 1),
            email: "not-an-email".to_string(),
            department: "nope".to_string(),
            salary: "lots".to_string(),
            hire_date: "15/01/2024".to_string(),
        };
        let errors = input.validate(today()).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec!["first_name", "last_name", "email", "department", "salary", "hire_date"]
        );
    }

    #[test]
    fn test_salary_rules() {
        assert_eq!(parse_salary(" 1500.5 ").unwrap(), 1500.5);
        assert_eq!(parse_salary("0").unwrap(), 0.0);
        assert!(parse_salary("-1").is_err());
        assert!(parse_salary("NaN").is_err());
        assert!(parse_salary("inf").is_err());
        assert!(parse_salary("").is_err());
    }

    #[test]
    fn test_hire_date_rejects_bad_dates() {
        assert!(parse_hire_date("2024-02-30", today()).is_err());
        assert!(parse_hire_date("yesterday", today()).is_err());
    }

    #[test]
    fn test_form_round_trips_through_employee() {
        let employee = ann().validate(today()).unwrap().into_employee(7);
        assert_eq!(employee.full_name(), "Ann Lee");
        let input = EmployeeInput::from_employee(&employee);
        assert_eq!(input, ann());
    }
}
