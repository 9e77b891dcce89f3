//! HTTP tests for the assembled application, backed by the in-memory store.

use std::sync::Arc;

use actix_web::{
    App,
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    http::{StatusCode, header::ContentType},
    middleware::NormalizePath,
    test,
    web::Data,
};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use crate::{
    api::{attendance::AttendanceResponse, employee::EmployeeResponse},
    routes,
    service::{AttendanceService, EmployeeService},
    store::{Store, memory::MemoryStore},
};

#[fixture]
fn store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::default())
}

fn test_app(
    store: Arc<MemoryStore>,
    api_prefix: &str,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let store: Arc<dyn Store> = store;
    let api_prefix = api_prefix.to_string();
    App::new()
        .wrap(NormalizePath::trim())
        .app_data(Data::new(EmployeeService::new(store.clone())))
        .app_data(Data::new(AttendanceService::new(store)))
        .configure(move |cfg| routes::configure(cfg, &api_prefix))
}

fn ann() -> Value {
    json!({
        "employeeId": "E100",
        "fullName": "Ann Lee",
        "email": "Ann@Example.com",
        "department": "Eng"
    })
}

#[rstest]
#[actix_web::test]
async fn create_then_reject_duplicate_employee_id(store: Arc<MemoryStore>) {
    let app = test::init_service(test_app(store, "")).await;

    let req = test::TestRequest::post()
        .uri("/employees")
        .set_json(ann())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["email"], "ann@example.com");
    assert_eq!(body["employeeId"], "E100");
    assert!(body["id"].is_string());

    let mut again = ann();
    again["employeeId"] = json!("e100");
    let req = test::TestRequest::post()
        .uri("/employees")
        .set_json(again)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({"message": "An employee with this Employee ID already exists."})
    );
}

#[rstest]
#[case(json!({}), "Employee ID is required.")]
#[case(json!({"employeeId": "E1"}), "Full name is required.")]
#[case(json!({"employeeId": "E1", "fullName": "Ann", "email": "nope", "department": ""}), "Please enter a valid email address.")]
#[case(json!({"employeeId": "E1", "fullName": "Ann", "email": "a@b.co", "department": null}), "Department is required.")]
#[case(json!({"employeeId": ["E1"], "fullName": "Ann"}), "Employee ID is required.")]
#[actix_web::test]
async fn invalid_employee_reports_first_failure(
    store: Arc<MemoryStore>,
    #[case] payload: Value,
    #[case] message: &str,
) {
    let app = test::init_service(test_app(store, "")).await;

    let req = test::TestRequest::post()
        .uri("/employees")
        .set_json(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "message": message }));
}

#[rstest]
#[actix_web::test]
async fn malformed_json_is_a_bad_request(store: Arc<MemoryStore>) {
    let app = test::init_service(test_app(store, "")).await;

    let req = test::TestRequest::post()
        .uri("/employees")
        .insert_header(ContentType::json())
        .set_payload("{\"employeeId\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"message": "Invalid input"}));
}

#[rstest]
#[actix_web::test]
async fn list_get_and_delete_employee(store: Arc<MemoryStore>) {
    let app = test::init_service(test_app(store, "")).await;

    let req = test::TestRequest::post()
        .uri("/employees")
        .set_json(ann())
        .to_request();
    let created: EmployeeResponse = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::get().uri("/employees").to_request();
    let listed: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listed.len(), 1);
    let mut keys: Vec<_> = listed[0].as_object().unwrap().keys().cloned().collect();
    keys.sort();
    assert_eq!(keys, ["department", "email", "employeeId", "fullName", "id"]);

    let uri = format!("/employees/{}", created.id);
    let req = test::TestRequest::get().uri(&uri).to_request();
    let fetched: EmployeeResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched, created);

    let req = test::TestRequest::delete().uri(&uri).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(test::read_body(resp).await.is_empty());

    let req = test::TestRequest::delete().uri(&uri).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get().uri(&uri).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[case("/employees/8d7e3a1c-0000-4000-8000-000000000000")]
#[case("/employees/not-a-uuid")]
#[actix_web::test]
async fn unknown_employee_is_not_found(store: Arc<MemoryStore>, #[case] uri: &str) {
    let app = test::init_service(test_app(store, "")).await;

    let req = test::TestRequest::get().uri(uri).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn attendance_upsert_list_and_cascade(store: Arc<MemoryStore>) {
    let app = test::init_service(test_app(store.clone(), "")).await;

    let req = test::TestRequest::post()
        .uri("/employees")
        .set_json(ann())
        .to_request();
    let employee: EmployeeResponse = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/attendance")
        .set_json(json!({"employeeId": "E100", "date": "2024-01-01", "status": "Present"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let first: AttendanceResponse = test::read_body_json(resp).await;

    // Snake-case key is accepted too.
    let req = test::TestRequest::post()
        .uri("/attendance")
        .set_json(json!({"employee_id": "E100", "date": "2024-01-01", "status": "Absent"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let second: AttendanceResponse = test::read_body_json(resp).await;
    assert_eq!(second.id, first.id);

    let req = test::TestRequest::get()
        .uri("/attendance?employeeId=E100")
        .to_request();
    let listed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        listed,
        json!([{
            "id": first.id,
            "employeeId": "E100",
            "date": "2024-01-01",
            "status": "Absent"
        }])
    );
    assert_eq!(store.attendance_rows().len(), 1);

    let req = test::TestRequest::delete()
        .uri(&format!("/employees/{}", employee.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri("/attendance?employeeId=E100")
        .to_request();
    let listed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listed, json!([]));
    assert!(store.attendance_rows().is_empty());
}

#[rstest]
#[case("/attendance")]
#[case("/attendance?employeeId=")]
#[case("/attendance?employeeId=unknown")]
#[actix_web::test]
async fn attendance_list_is_lenient(store: Arc<MemoryStore>, #[case] uri: &str) {
    let app = test::init_service(test_app(store, "")).await;

    let req = test::TestRequest::get().uri(uri).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!([]));
}

#[rstest]
#[case("/attendance?employeeId=E100&employeeId=E100")]
#[case("/attendance?employeeId=nope&employeeId=E100")]
#[actix_web::test]
async fn repeated_employee_id_uses_last_value(store: Arc<MemoryStore>, #[case] uri: &str) {
    let app = test::init_service(test_app(store, "")).await;

    let req = test::TestRequest::post()
        .uri("/employees")
        .set_json(ann())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/attendance")
        .set_json(json!({"employeeId": "E100", "date": "2024-01-01", "status": "Present"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::get().uri(uri).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["employeeId"], "E100");
}

#[rstest]
#[case(json!({"date": "2024-01-01", "status": "Present"}), "Employee is required.")]
#[case(json!({"employeeId": "E404", "date": "2024-01-01", "status": "Present"}), "Employee not found.")]
#[case(json!({"employeeId": "E100", "status": "Present"}), "Date is required.")]
#[case(json!({"employeeId": "E100", "date": "2024-01-01", "status": "present"}), "Status must be Present or Absent.")]
#[actix_web::test]
async fn invalid_attendance_is_a_bad_request(
    store: Arc<MemoryStore>,
    #[case] payload: Value,
    #[case] message: &str,
) {
    let app = test::init_service(test_app(store, "")).await;

    let req = test::TestRequest::post()
        .uri("/employees")
        .set_json(ann())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/attendance")
        .set_json(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "message": message }));
}

#[rstest]
#[actix_web::test]
async fn resources_mount_under_configured_prefix(store: Arc<MemoryStore>) {
    let app = test::init_service(test_app(store, "/api")).await;

    let req = test::TestRequest::get().uri("/api/employees/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/employees").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
