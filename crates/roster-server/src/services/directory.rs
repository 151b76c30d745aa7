//! Employee directory service
//!
//! Validates raw form input, then performs exactly one store operation.
//! Handlers never talk to the store directly.

use chrono::{NaiveDate, Utc};
use metrics::counter;
use roster_core::{Employee, EmployeeInput, EmployeeStore, Result, RosterError, SearchQuery};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct EmployeeDirectory {
    store: Arc<dyn EmployeeStore>,
}

impl EmployeeDirectory {
    pub fn new(store: Arc<dyn EmployeeStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self, q: Option<&str>) -> Result<Vec<Employee>> {
        let query = SearchQuery::parse(q);
        debug!("Listing employees: {:?}", query);
        self.store.search(&query).await
    }

    pub async fn get(&self, id: i32) -> Result<Employee> {
        self.store
            .get_employee(id)
            .await?
            .ok_or(RosterError::NotFound(id))
    }

    pub async fn hire(&self, input: &EmployeeInput) -> Result<Employee> {
        let result = self.hire_on(input, today()).await;
        record("hire", "employees_hired_total", &result);
        result
    }

    async fn hire_on(&self, input: &EmployeeInput, today: NaiveDate) -> Result<Employee> {
        let draft = input.validate(today)?;
        let employee = self.store.create_employee(&draft).await?;
        info!(
            "Hired employee {}: {} ({})",
            employee.id,
            employee.full_name(),
            employee.department.code()
        );
        Ok(employee)
    }

    /// Replace every field of employee `id`.
    ///
    /// The whole input is validated before the store is touched, so a
    /// rejected edit leaves the record exactly as it was.
    pub async fn edit(&self, id: i32, input: &EmployeeInput) -> Result<Employee> {
        let result = self.edit_on(id, input, today()).await;
        record("edit", "employees_updated_total", &result);
        result
    }

    async fn edit_on(&self, id: i32, input: &EmployeeInput, today: NaiveDate) -> Result<Employee> {
        let draft = input.validate(today)?;
        let employee = self.store.update_employee(id, &draft).await?;
        info!("Updated employee {}", employee.id);
        Ok(employee)
    }

    pub async fn fire(&self, id: i32) -> Result<()> {
        let result = self.store.delete_employee(id).await;
        if result.is_ok() {
            info!("Removed employee {}", id);
        }
        record("fire", "employees_fired_total", &result);
        result
    }

    pub async fn health(&self) -> Result<()> {
        self.store.ping().await
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn record<T>(operation: &'static str, success_counter: &'static str, result: &Result<T>) {
    match result {
        Ok(_) => counter!(success_counter).increment(1),
        Err(e) => {
            warn!("{} failed: {}", operation, e);
            counter!(
                "employee_write_failures_total",
                "operation" => operation,
                "kind" => e.kind()
            )
            .increment(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryEmployeeStore;
    use roster_core::Department;
    use tokio_test::{assert_err, assert_ok};

    fn directory() -> EmployeeDirectory {
        EmployeeDirectory::new(Arc::new(MemoryEmployeeStore::new()))
    }

    fn input(first: &str, email: &str, department: &str) -> EmployeeInput {
        EmployeeInput {
            first_name: first.to_string(),
            last_name: "Lee".to_string(),
            email: email.to_string(),
            department: department.to_string(),
            salary: "90000".to_string(),
            hire_date: "2024-01-15".to_string(),
        }
    }

    #[tokio::test]
    async fn test_hire_stores_exactly_what_was_submitted() {
        let directory = directory();
        let hired = assert_ok!(directory.hire(&input("Ann", "ann@x.com", "ENGINEERING")).await);

        let listing = directory.list(None).await.unwrap();
        assert_eq!(listing, vec![hired.clone()]);
        assert_eq!(hired.full_name(), "Ann Lee");
        assert_eq!(hired.email, "ann@x.com");
        assert_eq!(hired.department, Department::Engineering);
        assert_eq!(hired.salary, 90000.0);
        assert_eq!(hired.hire_date.to_string(), "2024-01-15");
    }

    #[tokio::test]
    async fn test_duplicate_email_leaves_count_unchanged() {
        let directory = directory();
        directory
            .hire(&input("Ann", "ann@x.com", "SALES"))
            .await
            .unwrap();

        let err = directory
            .hire(&input("Other", "ann@x.com", "SALES"))
            .await
            .unwrap_err();
        assert!(matches!(err, RosterError::Conflict(_)));
        assert_eq!(directory.list(None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_department_persists_nothing() {
        let directory = directory();
        let err = directory
            .hire(&input("Ann", "ann@x.com", "LEGAL"))
            .await
            .unwrap_err();
        assert!(matches!(err, RosterError::Validation(ref fields) if fields[0].field == "department"));
        assert!(directory.list(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_hire_date_uses_the_given_day() {
        let directory = directory();
        let mut form = input("Ann", "ann@x.com", "HR");
        form.hire_date = String::new();
        let day = NaiveDate::from_ymd_opt(2030, 3, 4).unwrap();

        let hired = directory.hire_on(&form, day).await.unwrap();
        assert_eq!(hired.hire_date, day);
    }

    #[tokio::test]
    async fn test_edit_missing_id_is_not_found() {
        let directory = directory();
        let err = directory
            .edit(404, &input("Ann", "ann@x.com", "HR"))
            .await
            .unwrap_err();
        assert_eq!(err, RosterError::NotFound(404));
    }

    #[tokio::test]
    async fn test_rejected_edit_changes_nothing() {
        let directory = directory();
        let hired = directory
            .hire(&input("Ann", "ann@x.com", "HR"))
            .await
            .unwrap();

        // Valid name change, invalid salary: nothing may be applied
        let mut form = input("Changed", "changed@x.com", "SALES");
        form.salary = "-5".to_string();
        assert_err!(directory.edit(hired.id, &form).await);

        assert_eq!(directory.get(hired.id).await.unwrap(), hired);
    }

    #[tokio::test]
    async fn test_edit_replaces_every_field_including_hire_date() {
        let directory = directory();
        let hired = directory
            .hire(&input("Ann", "ann@x.com", "HR"))
            .await
            .unwrap();

        let mut form = input("Anne", "anne@x.com", "FINANCE");
        form.salary = "120000.5".to_string();
        form.hire_date = "2020-02-29".to_string();
        let edited = directory.edit(hired.id, &form).await.unwrap();

        assert_eq!(edited.id, hired.id);
        assert_eq!(edited.first_name, "Anne");
        assert_eq!(edited.email, "anne@x.com");
        assert_eq!(edited.department, Department::Finance);
        assert_eq!(edited.salary, 120000.5);
        assert_eq!(edited.hire_date.to_string(), "2020-02-29");
    }

    #[tokio::test]
    async fn test_fire_then_refire() {
        let directory = directory();
        let hired = directory
            .hire(&input("Ann", "ann@x.com", "ENGINEERING"))
            .await
            .unwrap();

        directory.fire(hired.id).await.unwrap();
        assert!(directory.list(None).await.unwrap().is_empty());
        assert_eq!(
            directory.fire(hired.id).await.unwrap_err(),
            RosterError::NotFound(hired.id)
        );
    }

    #[tokio::test]
    async fn test_search_by_id_and_email() {
        let directory = directory();
        let ann = directory
            .hire(&input("Ann", "Ann@Example.com", "HR"))
            .await
            .unwrap();
        let bob = directory
            .hire(&input("Bob", "bob@example.com", "HR"))
            .await
            .unwrap();
        directory
            .hire(&input("Cy", "cy@other.org", "HR"))
            .await
            .unwrap();

        let by_id = directory.list(Some(&ann.id.to_string())).await.unwrap();
        assert_eq!(by_id, vec![ann.clone()]);

        let by_email = directory.list(Some("EXAMPLE")).await.unwrap();
        assert_eq!(by_email, vec![bob, ann]);

        assert!(directory.list(Some("12345")).await.unwrap().is_empty());
    }
}
