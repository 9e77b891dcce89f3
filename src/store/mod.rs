//! Data Store port and its adapters.

use async_trait::async_trait;
use derive_more::Display;
use uuid::Uuid;

use crate::model::{attendance::Attendance, employee::Employee};

#[cfg(test)]
pub mod memory;
pub mod mysql;

#[derive(Debug, Display)]
pub enum StoreError {
    /// A unique key (employee business id) is already in use.
    #[display(fmt = "unique constraint violated")]
    Conflict,
    /// The referenced employee no longer exists.
    #[display(fmt = "referenced employee does not exist")]
    MissingReference,
    #[display(fmt = "{}", _0)]
    Backend(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return StoreError::Conflict;
            }
            if db_err.is_foreign_key_violation() {
                return StoreError::MissingReference;
            }
        }
        StoreError::Backend(err)
    }
}

/// Durable storage for employees and their attendance.
///
/// Implementations enforce the uniqueness constraints themselves: employee
/// business ids are unique case-insensitively, and attendance is unique per
/// (employee, date).
#[async_trait]
pub trait Store: Send + Sync {
    /// All employees ordered by full name, ties in insertion order.
    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError>;

    async fn find_employee(&self, id: Uuid) -> Result<Option<Employee>, StoreError>;

    /// Exact, case-sensitive lookup by business id.
    async fn find_employee_by_code(&self, employee_id: &str)
    -> Result<Option<Employee>, StoreError>;

    /// Whether any employee other than `exclude` uses `employee_id`, ignoring case.
    async fn employee_id_taken(
        &self,
        employee_id: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, StoreError>;

    /// Fails with [`StoreError::Conflict`] when the business id is already used.
    async fn insert_employee(&self, employee: &Employee) -> Result<(), StoreError>;

    /// Removes the employee and all of its attendance in one transaction.
    /// Returns `false` when no such employee exists.
    async fn delete_employee(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Attendance for one employee, newest date first.
    async fn list_attendance(&self, employee: &Employee) -> Result<Vec<Attendance>, StoreError>;

    /// Atomically inserts `candidate`, or overwrites the status of the existing
    /// row for the same (employee, date). Returns the stored row.
    async fn upsert_attendance(&self, candidate: &Attendance) -> Result<Attendance, StoreError>;
}
