use chrono::NaiveDate;
use derive_more::Display;
use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

use crate::{
    error::ServiceError,
    model::{
        attendance::AttendanceStatus,
        employee::{Employee, NewEmployee},
    },
    store::Store,
};

/// Column widths of the `employees` table.
pub const EMPLOYEE_ID_MAX_LEN: usize = 64;
pub const FULL_NAME_MAX_LEN: usize = 255;
pub const EMAIL_MAX_LEN: usize = 254;
pub const DEPARTMENT_MAX_LEN: usize = 255;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// A single field-level or cross-record rule failure.
///
/// Every variant carries the message returned to API clients verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ValidationError {
    #[display(fmt = "{}", _0)]
    RequiredField(&'static str),
    #[display(fmt = "{}", _0)]
    InvalidFormat(&'static str),
    #[display(fmt = "{}", _0)]
    InvalidEnum(&'static str),
    #[display(fmt = "{}", _0)]
    DuplicateKey(&'static str),
    #[display(fmt = "{}", _0)]
    NotFound(&'static str),
}

impl ValidationError {
    pub fn message(&self) -> &'static str {
        match self {
            ValidationError::RequiredField(m)
            | ValidationError::InvalidFormat(m)
            | ValidationError::InvalidEnum(m)
            | ValidationError::DuplicateKey(m)
            | ValidationError::NotFound(m) => m,
        }
    }
}

pub const DUPLICATE_EMPLOYEE_ID: ValidationError =
    ValidationError::DuplicateKey("An employee with this Employee ID already exists.");
pub const EMPLOYEE_NOT_FOUND: ValidationError = ValidationError::NotFound("Employee not found.");

/// Trim `raw` and reject it when nothing is left or it exceeds `max_len` characters.
fn required_text(
    raw: Option<&str>,
    max_len: usize,
    missing: &'static str,
    too_long: &'static str,
) -> Result<String, ValidationError> {
    let value = raw.unwrap_or_default().trim();
    if value.is_empty() {
        return Err(ValidationError::RequiredField(missing));
    }
    if value.chars().count() > max_len {
        return Err(ValidationError::InvalidFormat(too_long));
    }
    Ok(value.to_string())
}

pub fn validate_employee_id(raw: Option<&str>) -> Result<String, ValidationError> {
    required_text(
        raw,
        EMPLOYEE_ID_MAX_LEN,
        "Employee ID is required.",
        "Ensure Employee ID has no more than 64 characters.",
    )
}

pub fn validate_full_name(raw: Option<&str>) -> Result<String, ValidationError> {
    required_text(
        raw,
        FULL_NAME_MAX_LEN,
        "Full name is required.",
        "Ensure full name has no more than 255 characters.",
    )
}

/// Trims and lower-cases the address before matching `local@domain.tld`.
///
/// The length limit applies to the lower-cased value, which is what gets stored.
pub fn validate_email(raw: Option<&str>) -> Result<String, ValidationError> {
    let value = raw.unwrap_or_default().trim().to_lowercase();
    if value.is_empty() {
        return Err(ValidationError::RequiredField("Email address is required."));
    }
    if value.chars().count() > EMAIL_MAX_LEN {
        return Err(ValidationError::InvalidFormat(
            "Ensure email address has no more than 254 characters.",
        ));
    }
    if !EMAIL_PATTERN.is_match(&value) {
        return Err(ValidationError::InvalidFormat(
            "Please enter a valid email address.",
        ));
    }
    Ok(value)
}

pub fn validate_department(raw: Option<&str>) -> Result<String, ValidationError> {
    required_text(
        raw,
        DEPARTMENT_MAX_LEN,
        "Department is required.",
        "Ensure department has no more than 255 characters.",
    )
}

/// Exact, case-sensitive match against the two allowed values.
pub fn validate_attendance_status(raw: Option<&str>) -> Result<AttendanceStatus, ValidationError> {
    raw.and_then(|s| s.parse().ok())
        .ok_or(ValidationError::InvalidEnum("Status must be Present or Absent."))
}

/// Parses an ISO calendar date (`YYYY-MM-DD`).
pub fn validate_date(raw: Option<&str>) -> Result<NaiveDate, ValidationError> {
    let value = raw.unwrap_or_default().trim();
    if value.is_empty() {
        return Err(ValidationError::RequiredField("Date is required."));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        ValidationError::RequiredField(
            "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.",
        )
    })
}

/// The employee reference on an attendance write: trimmed, non-empty.
pub fn validate_attendance_employee(raw: Option<&str>) -> Result<String, ValidationError> {
    let value = raw.unwrap_or_default().trim();
    if value.is_empty() {
        return Err(ValidationError::RequiredField("Employee is required."));
    }
    Ok(value.to_string())
}

/// Field rules for an employee write, in the order their failures are reported.
pub fn validate_new_employee(
    employee_id: Option<&str>,
    full_name: Option<&str>,
    email: Option<&str>,
    department: Option<&str>,
) -> Result<NewEmployee, ValidationError> {
    Ok(NewEmployee {
        employee_id: validate_employee_id(employee_id)?,
        full_name: validate_full_name(full_name)?,
        email: validate_email(email)?,
        department: validate_department(department)?,
    })
}

/// Fails with `DuplicateKey` when another employee already uses `employee_id`,
/// compared case-insensitively. `exclude` skips the record being edited.
pub async fn ensure_employee_id_available(
    store: &dyn Store,
    employee_id: &str,
    exclude: Option<Uuid>,
) -> Result<(), ServiceError> {
    if store.employee_id_taken(employee_id, exclude).await? {
        return Err(DUPLICATE_EMPLOYEE_ID.into());
    }
    Ok(())
}

/// Resolves an attendance write's employee reference by exact business id.
pub async fn resolve_employee(store: &dyn Store, employee_id: &str) -> Result<Employee, ServiceError> {
    store
        .find_employee_by_code(employee_id)
        .await?
        .ok_or_else(|| EMPLOYEE_NOT_FOUND.into())
}
