use crate::api::attendance::{AttendanceResponse, MarkAttendance};
use crate::api::employee::{CreateEmployee, EmployeeResponse};
use crate::model::attendance::AttendanceStatus;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HR Records API",
        version = "1.0.0",
        description = r#"
## HR record keeping

Employee records and their daily attendance, as JSON over HTTP.

### Employees
- List, create, view, and delete employees
- `employeeId` is unique regardless of letter case
- Deleting an employee also deletes its attendance

### Attendance
- One record per employee per day; marking the same day again overwrites the status
- Status is `Present` or `Absent`

### Errors
Failures return `{"message": "..."}` describing the first problem found.
"#,
    ),
    paths(
        crate::api::employee::list_employees,
        crate::api::employee::create_employee,
        crate::api::employee::get_employee,
        crate::api::employee::delete_employee,

        crate::api::attendance::list_attendance,
        crate::api::attendance::mark_attendance
    ),
    components(
        schemas(
            CreateEmployee,
            EmployeeResponse,
            MarkAttendance,
            AttendanceResponse,
            AttendanceStatus
        )
    ),
    tags(
        (name = "Employee", description = "Employee management APIs"),
        (name = "Attendance", description = "Attendance management APIs"),
    )
)]
pub struct ApiDoc;
