use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;

use super::employee::Employee;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display, ToSchema,
)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

/// One day of attendance for one employee.
///
/// `employee_ref` points at [`Employee::id`]; `employee_id` is the owner's
/// business identifier, carried along for presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attendance {
    pub id: Uuid,
    pub employee_ref: Uuid,
    pub employee_id: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub created_at: DateTime<Utc>,
}

impl Attendance {
    /// Candidate row for an upsert. The store keeps the existing `id` and
    /// `created_at` when a row for the same (employee, date) already exists.
    pub fn candidate(employee: &Employee, date: NaiveDate, status: AttendanceStatus) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_ref: employee.id,
            employee_id: employee.employee_id.clone(),
            date,
            status,
            created_at: Utc::now(),
        }
    }
}
