use crate::{
    api::text_field,
    error::ServiceError,
    model::employee::Employee,
    service::{EmployeeInput, EmployeeService},
};
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployee {
    #[schema(example = "E100", value_type = String)]
    pub employee_id: Option<Value>,
    #[schema(example = "Ann Lee", value_type = String)]
    pub full_name: Option<Value>,
    #[schema(example = "ann@example.com", format = "email", value_type = String)]
    pub email: Option<Value>,
    #[schema(example = "Engineering", value_type = String)]
    pub department: Option<Value>,
}

impl From<CreateEmployee> for EmployeeInput {
    fn from(body: CreateEmployee) -> Self {
        Self {
            employee_id: text_field(body.employee_id.as_ref()),
            full_name: text_field(body.full_name.as_ref()),
            email: text_field(body.email.as_ref()),
            department: text_field(body.department.as_ref()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "id": "5f0c1c9e-8a43-4d2e-9a51-2f0b8f6a7d10",
    "employeeId": "E100",
    "fullName": "Ann Lee",
    "email": "ann@example.com",
    "department": "Engineering"
}))]
pub struct EmployeeResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: Uuid,
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
}

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id,
            employee_id: employee.employee_id,
            full_name: employee.full_name,
            email: employee.email,
            department: employee.department,
        }
    }
}

/// List employees
#[utoipa::path(
    get,
    path = "/employees",
    responses(
        (status = 200, description = "All employees ordered by full name", body = [EmployeeResponse])
    ),
    tag = "Employee"
)]
pub async fn list_employees(
    service: web::Data<EmployeeService>,
) -> Result<HttpResponse, ServiceError> {
    let employees = service.list().await?;

    Ok(HttpResponse::Ok().json(
        employees
            .into_iter()
            .map(EmployeeResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = EmployeeResponse),
        (status = 400, description = "Validation failed", body = Object, example = json!({
            "message": "An employee with this Employee ID already exists."
        }))
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    service: web::Data<EmployeeService>,
    payload: web::Json<CreateEmployee>,
) -> Result<HttpResponse, ServiceError> {
    let employee = service.create(payload.into_inner().into()).await?;

    Ok(HttpResponse::Created().json(EmployeeResponse::from(employee)))
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/employees/{id}",
    params(
        ("id", Path, description = "Employee record identifier (UUID)")
    ),
    responses(
        (status = 200, description = "Employee found", body = EmployeeResponse),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    service: web::Data<EmployeeService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let employee = service.get(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(EmployeeResponse::from(employee)))
}

/// Delete Employee and its attendance
#[utoipa::path(
    delete,
    path = "/employees/{id}",
    params(
        ("id", Path, description = "Employee record identifier (UUID)")
    ),
    responses(
        (status = 204, description = "Employee and its attendance deleted"),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    service: web::Data<EmployeeService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    service.delete(path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}
