//! Roster Core Library
//!
//! Domain errors, the employee store port and search query parsing.

// Re-export pure types from roster-types
pub use roster_types::*;

pub mod error;
pub mod ports;
pub mod search;

pub use error::{Result, RosterError};
pub use ports::EmployeeStore;
pub use search::SearchQuery;
