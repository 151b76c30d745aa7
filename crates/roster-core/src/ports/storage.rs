//! Storage trait for employee persistence

use crate::{Result, SearchQuery};
use async_trait::async_trait;
use roster_types::{Employee, EmployeeDraft};

/// Employee store
///
/// Every write runs as one unit: it either fully applies or leaves the store
/// untouched. Implementations map uniqueness violations on `email` to
/// `RosterError::Conflict` and missing ids to `RosterError::NotFound`.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Round-trip check used by the health probe.
    async fn ping(&self) -> Result<()>;
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Employee>>;
    async fn get_employee(&self, id: i32) -> Result<Option<Employee>>;
    async fn create_employee(&self, draft: &EmployeeDraft) -> Result<Employee>;
    /// Replace every field except `id`.
    async fn update_employee(&self, id: i32, draft: &EmployeeDraft) -> Result<Employee>;
    async fn delete_employee(&self, id: i32) -> Result<()>;
}
