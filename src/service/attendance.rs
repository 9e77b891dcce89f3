use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    error::ServiceError,
    model::attendance::Attendance,
    store::{Store, StoreError},
    utils::validation::{self, EMPLOYEE_NOT_FOUND},
};

/// Raw attendance fields as received from a client.
#[derive(Debug, Clone, Default)]
pub struct AttendanceInput {
    pub employee_id: Option<String>,
    pub date: Option<String>,
    pub status: Option<String>,
}

pub struct AttendanceService {
    store: Arc<dyn Store>,
}

impl AttendanceService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Attendance of the employee with business id `employee_id`, newest first.
    ///
    /// A blank or unknown id yields an empty list rather than an error.
    pub async fn list_for_employee(
        &self,
        employee_id: Option<&str>,
    ) -> Result<Vec<Attendance>, ServiceError> {
        let employee_id = employee_id.unwrap_or_default().trim();
        if employee_id.is_empty() {
            return Ok(Vec::new());
        }

        let Some(employee) = self.store.find_employee_by_code(employee_id).await? else {
            return Ok(Vec::new());
        };

        Ok(self.store.list_attendance(&employee).await?)
    }

    /// Records `status` for (employee, date), overwriting an earlier record
    /// for the same day.
    pub async fn upsert(&self, input: AttendanceInput) -> Result<Attendance, ServiceError> {
        let result = self.validate_and_store(&input).await;
        if let Err(ServiceError::Validation(reason)) = &result {
            warn!(reason = %reason, employee_id = ?input.employee_id, "Rejected attendance");
        }
        result
    }

    async fn validate_and_store(&self, input: &AttendanceInput) -> Result<Attendance, ServiceError> {
        let employee_id = validation::validate_attendance_employee(input.employee_id.as_deref())?;
        let employee = validation::resolve_employee(self.store.as_ref(), &employee_id).await?;
        let date = validation::validate_date(input.date.as_deref())?;
        let status = validation::validate_attendance_status(input.status.as_deref())?;

        let candidate = Attendance::candidate(&employee, date, status);
        let stored = match self.store.upsert_attendance(&candidate).await {
            Ok(stored) => stored,
            // Employee deleted between lookup and write.
            Err(StoreError::MissingReference) => return Err(EMPLOYEE_NOT_FOUND.into()),
            Err(e) => return Err(e.into()),
        };

        info!(
            id = %stored.id,
            employee_id = %stored.employee_id,
            date = %stored.date,
            status = %stored.status,
            "Attendance recorded"
        );
        Ok(stored)
    }
}
