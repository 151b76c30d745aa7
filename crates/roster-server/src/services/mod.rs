//! Business logic services

pub mod directory;

pub use directory::EmployeeDirectory;
