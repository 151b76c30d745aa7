//! Error types for Roster

use roster_types::FieldError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RosterError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RosterError {
    #[error("Invalid input: {}", join_fields(.0))]
    Validation(Vec<FieldError>),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Employee {0} not found")]
    NotFound(i32),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl RosterError {
    pub fn email_taken(email: &str) -> Self {
        RosterError::Conflict(format!("an employee with email {} already exists", email))
    }

    /// Short label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            RosterError::Validation(_) => "validation",
            RosterError::Conflict(_) => "conflict",
            RosterError::NotFound(_) => "not_found",
            RosterError::StoreUnavailable(_) => "store_unavailable",
            RosterError::Storage(_) => "storage",
        }
    }
}

impl From<Vec<FieldError>> for RosterError {
    fn from(errors: Vec<FieldError>) -> Self {
        RosterError::Validation(errors)
    }
}

fn join_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
