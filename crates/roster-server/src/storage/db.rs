//! PostgreSQL employee store

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use roster_core::{
    Department, Employee, EmployeeDraft, EmployeeStore, FieldError, RosterError, SearchQuery,
};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Duration;

const UNIQUE_VIOLATION: &str = "23505";
const CHECK_VIOLATION: &str = "23514";

pub struct PgEmployeeStore {
    pool: PgPool,
}

impl PgEmployeeStore {
    pub async fn connect(options: PgConnectOptions, max_connections: u32) -> Result<Self> {
        tracing::info!("Connecting to PostgreSQL...");

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect_with(options)
            .await
            .context("Failed to connect to PostgreSQL")?;

        tracing::info!("PostgreSQL connection established, running migrations...");

        Self::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;

        tracing::info!("Database initialization complete");

        Ok(Self { pool })
    }

    async fn run_migrations(pool: &PgPool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS employees (
                id SERIAL PRIMARY KEY,
                first_name VARCHAR(50) NOT NULL,
                last_name VARCHAR(50) NOT NULL,
                email VARCHAR(120) NOT NULL UNIQUE,
                department TEXT NOT NULL
                    CHECK (department IN ('HR', 'ENGINEERING', 'SALES', 'MARKETING', 'FINANCE', 'IT')),
                salary DOUBLE PRECISION NOT NULL CHECK (salary >= 0),
                hire_date DATE NOT NULL DEFAULT CURRENT_DATE
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl EmployeeStore for PgEmployeeStore {
    async fn ping(&self) -> roster_core::Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn search(&self, query: &SearchQuery) -> roster_core::Result<Vec<Employee>> {
        let rows = match query {
            SearchQuery::All => {
                sqlx::query_as::<_, EmployeeRow>(
                    r#"
                    SELECT id, first_name, last_name, email, department, salary, hire_date
                    FROM employees ORDER BY id DESC
                    "#,
                )
                .fetch_all(&self.pool)
                .await
            }
            SearchQuery::ById(id) => {
                sqlx::query_as::<_, EmployeeRow>(
                    r#"
                    SELECT id, first_name, last_name, email, department, salary, hire_date
                    FROM employees WHERE id = $1
                    "#,
                )
                .bind(id)
                .fetch_all(&self.pool)
                .await
            }
            SearchQuery::EmailContains(fragment) => {
                sqlx::query_as::<_, EmployeeRow>(
                    r#"
                    SELECT id, first_name, last_name, email, department, salary, hire_date
                    FROM employees WHERE email ILIKE $1
                    ORDER BY id DESC
                    "#,
                )
                .bind(contains_pattern(fragment))
                .fetch_all(&self.pool)
                .await
            }
            SearchQuery::NoMatch => return Ok(Vec::new()),
        }
        .map_err(map_sqlx_error)?;

        rows.into_iter().map(Employee::try_from).collect()
    }

    async fn get_employee(&self, id: i32) -> roster_core::Result<Option<Employee>> {
        let row: Option<EmployeeRow> = sqlx::query_as(
            r#"
            SELECT id, first_name, last_name, email, department, salary, hire_date
            FROM employees WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(Employee::try_from).transpose()
    }

    async fn create_employee(&self, draft: &EmployeeDraft) -> roster_core::Result<Employee> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        let result = sqlx::query_as::<_, EmployeeRow>(
            r#"
            INSERT INTO employees (first_name, last_name, email, department, salary, hire_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, first_name, last_name, email, department, salary, hire_date
            "#,
        )
        .bind(&draft.first_name)
        .bind(&draft.last_name)
        .bind(&draft.email)
        .bind(draft.department.code())
        .bind(draft.salary)
        .bind(draft.hire_date)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, &draft.email))
        .and_then(Employee::try_from);

        finish(tx, result).await
    }

    async fn update_employee(
        &self,
        id: i32,
        draft: &EmployeeDraft,
    ) -> roster_core::Result<Employee> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        let result = sqlx::query_as::<_, EmployeeRow>(
            r#"
            UPDATE employees
            SET first_name = $1, last_name = $2, email = $3,
                department = $4, salary = $5, hire_date = $6
            WHERE id = $7
            RETURNING id, first_name, last_name, email, department, salary, hire_date
            "#,
        )
        .bind(&draft.first_name)
        .bind(&draft.last_name)
        .bind(&draft.email)
        .bind(draft.department.code())
        .bind(draft.salary)
        .bind(draft.hire_date)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, &draft.email))
        .and_then(|row| row.ok_or(RosterError::NotFound(id)))
        .and_then(Employee::try_from);

        finish(tx, result).await
    }

    async fn delete_employee(&self, id: i32) -> roster_core::Result<()> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)
            .and_then(|done| {
                if done.rows_affected() == 0 {
                    Err(RosterError::NotFound(id))
                } else {
                    Ok(())
                }
            });

        finish(tx, result).await
    }
}

/// Commit on success, roll back explicitly on failure.
async fn finish<T>(
    tx: Transaction<'_, Postgres>,
    result: roster_core::Result<T>,
) -> roster_core::Result<T> {
    match result {
        Ok(value) => {
            tx.commit().await.map_err(map_sqlx_error)?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!("Rollback failed after {}: {}", e.kind(), rollback_err);
            }
            Err(e)
        }
    }
}

/// `ILIKE` pattern matching `fragment` anywhere, with wildcards escaped.
fn contains_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for c in fragment.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn map_sqlx_error(err: sqlx::Error) -> RosterError {
    match err {
        sqlx::Error::Database(db) => from_database_error(db.code().as_deref(), db.message()),
        e @ (sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Protocol(_)
        | sqlx::Error::WorkerCrashed) => RosterError::StoreUnavailable(e.to_string()),
        e => RosterError::Storage(e.to_string()),
    }
}

/// Like `map_sqlx_error`, but names the email on uniqueness violations.
fn map_write_error(err: sqlx::Error, email: &str) -> RosterError {
    match map_sqlx_error(err) {
        RosterError::Conflict(_) => RosterError::email_taken(email),
        other => other,
    }
}

fn from_database_error(code: Option<&str>, message: &str) -> RosterError {
    match code {
        Some(UNIQUE_VIOLATION) => RosterError::Conflict(message.to_string()),
        Some(CHECK_VIOLATION) => {
            RosterError::Validation(vec![FieldError::new("employee", message)])
        }
        // Class 08 (connection exception) and 57P (operator intervention)
        Some(c) if c.starts_with("08") || c.starts_with("57P") => {
            RosterError::StoreUnavailable(message.to_string())
        }
        _ => RosterError::Storage(message.to_string()),
    }
}

// Helper struct for sqlx query_as
#[derive(sqlx::FromRow)]
struct EmployeeRow {
    id: i32,
    first_name: String,
    last_name: String,
    email: String,
    department: String,
    salary: f64,
    hire_date: NaiveDate,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = RosterError;

    fn try_from(r: EmployeeRow) -> Result<Self, Self::Error> {
        let department = Department::from_code(&r.department).map_err(|e| {
            RosterError::Storage(format!("employee {} has {}", r.id, e))
        })?;

        Ok(Employee {
            id: r.id,
            first_name: r.first_name,
            last_name: r.last_name,
            email: r.email,
            department,
            salary: r.salary,
            hire_date: r.hire_date,
        })
    }
}
