//! Storage layer
//!
//! PostgreSQL for real deployments; DashMap (in-memory) for local runs and tests.

pub mod db;
pub mod memory;

pub use db::PgEmployeeStore;
pub use memory::MemoryEmployeeStore;
