//! In-memory employee store using DashMap
//!
//! Used for local runs without PostgreSQL (`STORE_BACKEND=memory`) and by the
//! handler tests. Data lives only as long as the process.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use roster_core::{Employee, EmployeeDraft, EmployeeStore, Result, RosterError, SearchQuery};
use std::sync::atomic::{AtomicI32, Ordering};

pub struct MemoryEmployeeStore {
    rows: DashMap<i32, Employee>,
    /// Unique email index: email -> owning id
    emails: DashMap<String, i32>,
    next_id: AtomicI32,
}

impl MemoryEmployeeStore {
    pub fn new() -> Self {
        Self {
            rows: DashMap::new(),
            emails: DashMap::new(),
            next_id: AtomicI32::new(1),
        }
    }

    /// Reserve `email` for `id`. Fails if another employee holds it.
    fn claim_email(&self, email: &str, id: i32) -> Result<()> {
        match self.emails.entry(email.to_string()) {
            Entry::Occupied(owner) if *owner.get() != id => Err(RosterError::email_taken(email)),
            Entry::Occupied(_) => Ok(()),
            Entry::Vacant(slot) => {
                slot.insert(id);
                Ok(())
            }
        }
    }
}

impl Default for MemoryEmployeeStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmployeeStore for MemoryEmployeeStore {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<Employee>> {
        let mut found: Vec<Employee> = self
            .rows
            .iter()
            .filter(|entry| query.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        found.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(found)
    }

    async fn get_employee(&self, id: i32) -> Result<Option<Employee>> {
        Ok(self.rows.get(&id).map(|entry| entry.value().clone()))
    }

    async fn create_employee(&self, draft: &EmployeeDraft) -> Result<Employee> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.claim_email(&draft.email, id)?;

        let employee = draft.clone().into_employee(id);
        self.rows.insert(id, employee.clone());
        Ok(employee)
    }

    async fn update_employee(&self, id: i32, draft: &EmployeeDraft) -> Result<Employee> {
        // Holding the row guard serialises writers of the same id
        let mut current = self.rows.get_mut(&id).ok_or(RosterError::NotFound(id))?;

        if current.email != draft.email {
            self.claim_email(&draft.email, id)?;
            self.emails.remove_if(&current.email, |_, owner| *owner == id);
        }

        *current = draft.clone().into_employee(id);
        Ok(current.clone())
    }

    async fn delete_employee(&self, id: i32) -> Result<()> {
        let (_, removed) = self.rows.remove(&id).ok_or(RosterError::NotFound(id))?;
        self.emails.remove_if(&removed.email, |_, owner| *owner == id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use roster_core::Department;

    fn draft(email: &str) -> EmployeeDraft {
        EmployeeDraft {
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            email: email.to_string(),
            department: Department::Engineering,
            salary: 90000.0,
            hire_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_ids_are_fresh_and_listing_is_newest_first() {
        let store = MemoryEmployeeStore::new();
        let a = store.create_employee(&draft("a@x.com")).await.unwrap();
        let b = store.create_employee(&draft("b@x.com")).await.unwrap();
        assert_ne!(a.id, b.id);

        let ids: Vec<i32> = store
            .search(&SearchQuery::All)
            .await
            .unwrap()
            .iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec![b.id, a.id]);
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = MemoryEmployeeStore::new();
        store.create_employee(&draft("a@x.com")).await.unwrap();

        let err = store.create_employee(&draft("a@x.com")).await.unwrap_err();
        assert!(matches!(err, RosterError::Conflict(_)));
        assert_eq!(store.search(&SearchQuery::All).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_moves_the_email_index() {
        let store = MemoryEmployeeStore::new();
        let a = store.create_employee(&draft("a@x.com")).await.unwrap();
        let b = store.create_employee(&draft("b@x.com")).await.unwrap();

        // b cannot take a's email
        let err = store
            .update_employee(b.id, &draft("a@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, RosterError::Conflict(_)));

        // a renames, freeing its old address
        store.update_employee(a.id, &draft("new@x.com")).await.unwrap();
        store.update_employee(b.id, &draft("a@x.com")).await.unwrap();

        let stored = store.get_employee(b.id).await.unwrap().unwrap();
        assert_eq!(stored.email, "a@x.com");
    }

    #[tokio::test]
    async fn test_update_keeping_email_is_allowed() {
        let store = MemoryEmployeeStore::new();
        let a = store.create_employee(&draft("a@x.com")).await.unwrap();

        let mut changed = draft("a@x.com");
        changed.salary = 100.0;
        let updated = store.update_employee(a.id, &changed).await.unwrap();
        assert_eq!(updated.salary, 100.0);
    }

    #[tokio::test]
    async fn test_delete_frees_email_and_reports_missing() {
        let store = MemoryEmployeeStore::new();
        let a = store.create_employee(&draft("a@x.com")).await.unwrap();

        store.delete_employee(a.id).await.unwrap();
        assert!(matches!(
            store.delete_employee(a.id).await,
            Err(RosterError::NotFound(id)) if id == a.id
        ));
        let rehired = store.create_employee(&draft("a@x.com")).await.unwrap();
        assert_ne!(rehired.id, a.id);
    }

    #[tokio::test]
    async fn test_update_missing_id_is_not_found() {
        let store = MemoryEmployeeStore::new();
        assert!(matches!(
            store.update_employee(99, &draft("a@x.com")).await,
            Err(RosterError::NotFound(99))
        ));
    }
}
