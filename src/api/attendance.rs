use crate::{
    api::text_field,
    error::ServiceError,
    model::attendance::{Attendance, AttendanceStatus},
    service::{AttendanceInput, AttendanceService},
};
use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AttendanceQuery {
    /// Business identifier of the employee
    #[param(rename = "employeeId", example = "E100")]
    pub employee_id: Option<String>,
}

/// Built from the raw query map, so a repeated `employeeId` keeps its last
/// value instead of failing extraction.
impl From<HashMap<String, String>> for AttendanceQuery {
    fn from(mut params: HashMap<String, String>) -> Self {
        Self {
            employee_id: params.remove("employeeId"),
        }
    }
}

/// Attendance write. The employee may be given as `employeeId` or
/// `employee_id`; the latter wins when both are present.
#[derive(Deserialize, ToSchema)]
pub struct MarkAttendance {
    #[serde(rename = "employeeId")]
    #[schema(example = "E100", value_type = String)]
    pub employee_id: Option<Value>,
    #[serde(rename = "employee_id")]
    #[schema(value_type = String)]
    pub employee_key: Option<Value>,
    #[schema(example = "2024-01-01", format = "date", value_type = String)]
    pub date: Option<Value>,
    #[schema(example = "Present", value_type = AttendanceStatus)]
    pub status: Option<Value>,
}

impl From<MarkAttendance> for AttendanceInput {
    fn from(body: MarkAttendance) -> Self {
        let employee = body.employee_key.or(body.employee_id);
        Self {
            employee_id: text_field(employee.as_ref()),
            date: text_field(body.date.as_ref()),
            status: text_field(body.status.as_ref()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: Uuid,
    #[schema(example = "E100")]
    pub employee_id: String,
    #[schema(example = "2024-01-01", format = "date", value_type = String)]
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

impl From<Attendance> for AttendanceResponse {
    fn from(record: Attendance) -> Self {
        Self {
            id: record.id,
            employee_id: record.employee_id,
            date: record.date,
            status: record.status,
        }
    }
}

/// List attendance of one employee
#[utoipa::path(
    get,
    path = "/attendance",
    params(AttendanceQuery),
    responses(
        (status = 200, description = "Attendance newest first; empty when the employee is missing or unknown", body = [AttendanceResponse])
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    service: web::Data<AttendanceService>,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, ServiceError> {
    let query = AttendanceQuery::from(query.into_inner());
    let records = service
        .list_for_employee(query.employee_id.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(
        records
            .into_iter()
            .map(AttendanceResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// Mark attendance
///
/// Creates the record for (employee, date), or overwrites its status when one exists.
#[utoipa::path(
    post,
    path = "/attendance",
    request_body = MarkAttendance,
    responses(
        (status = 201, description = "Attendance created or updated", body = AttendanceResponse),
        (status = 400, description = "Validation failed", body = Object, example = json!({
            "message": "Employee not found."
        }))
    ),
    tag = "Attendance"
)]
pub async fn mark_attendance(
    service: web::Data<AttendanceService>,
    payload: web::Json<MarkAttendance>,
) -> Result<HttpResponse, ServiceError> {
    let record = service.upsert(payload.into_inner().into()).await?;

    Ok(HttpResponse::Created().json(AttendanceResponse::from(record)))
}
