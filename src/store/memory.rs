use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use super::{Store, StoreError};
use crate::model::{attendance::Attendance, employee::Employee};

/// In-process [`Store`] with the same constraints as the MySQL schema.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    employees: Vec<Employee>,
    attendance: Vec<Attendance>,
}

impl MemoryStore {
    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().expect("memory store poisoned")
    }

    /// Raw attendance rows, for assertions on the uniqueness invariant.
    pub fn attendance_rows(&self) -> Vec<Attendance> {
        self.tables().attendance.clone()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError> {
        let mut employees = self.tables().employees.clone();
        employees.sort_by_key(|e| e.full_name.to_lowercase());
        Ok(employees)
    }

    async fn find_employee(&self, id: Uuid) -> Result<Option<Employee>, StoreError> {
        Ok(self.tables().employees.iter().find(|e| e.id == id).cloned())
    }

    async fn find_employee_by_code(
        &self,
        employee_id: &str,
    ) -> Result<Option<Employee>, StoreError> {
        Ok(self
            .tables()
            .employees
            .iter()
            .find(|e| e.employee_id == employee_id)
            .cloned())
    }

    async fn employee_id_taken(
        &self,
        employee_id: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, StoreError> {
        let wanted = employee_id.to_lowercase();
        Ok(self
            .tables()
            .employees
            .iter()
            .any(|e| Some(e.id) != exclude && e.employee_id.to_lowercase() == wanted))
    }

    async fn insert_employee(&self, employee: &Employee) -> Result<(), StoreError> {
        let mut tables = self.tables();
        let wanted = employee.employee_id.to_lowercase();
        if tables
            .employees
            .iter()
            .any(|e| e.employee_id.to_lowercase() == wanted)
        {
            return Err(StoreError::Conflict);
        }
        tables.employees.push(employee.clone());
        Ok(())
    }

    async fn delete_employee(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut tables = self.tables();
        let before = tables.employees.len();
        tables.employees.retain(|e| e.id != id);
        if tables.employees.len() == before {
            return Ok(false);
        }
        tables.attendance.retain(|a| a.employee_ref != id);
        Ok(true)
    }

    async fn list_attendance(&self, employee: &Employee) -> Result<Vec<Attendance>, StoreError> {
        let mut records: Vec<_> = self
            .tables()
            .attendance
            .iter()
            .filter(|a| a.employee_ref == employee.id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(records)
    }

    async fn upsert_attendance(&self, candidate: &Attendance) -> Result<Attendance, StoreError> {
        let mut tables = self.tables();

        if let Some(existing) = tables
            .attendance
            .iter_mut()
            .find(|a| a.employee_ref == candidate.employee_ref && a.date == candidate.date)
        {
            existing.status = candidate.status;
            return Ok(existing.clone());
        }

        if !tables.employees.iter().any(|e| e.id == candidate.employee_ref) {
            return Err(StoreError::MissingReference);
        }
        tables.attendance.push(candidate.clone());
        Ok(candidate.clone())
    }
}
