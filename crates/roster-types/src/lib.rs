//! Roster Types - Pure type definitions
//!
//! Employee records, the department enumeration and form validation.
//! No async runtime or database dependencies live here.

pub mod department;
pub mod employee;

pub use department::*;
pub use employee::*;
