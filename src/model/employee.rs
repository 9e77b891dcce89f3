use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A stored employee record.
///
/// `employee_id` is the business identifier chosen by HR; `id` is the opaque
/// storage key and never changes once generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub id: Uuid,
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
    pub created_at: DateTime<Utc>,
}

/// Normalised employee fields that passed field-level validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
}

impl Employee {
    /// Build a fresh record with a new identifier and creation timestamp.
    pub fn create(fields: NewEmployee) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_id: fields.employee_id,
            full_name: fields.full_name,
            email: fields.email,
            department: fields.department,
            created_at: Utc::now(),
        }
    }
}
