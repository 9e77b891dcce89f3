use crate::api::{attendance, employee};
use actix_web::{HttpResponse, error::InternalError, web};
use serde_json::json;
use tracing::warn;

/// Bodies that are not valid JSON objects get the same envelope as field errors.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        warn!(error = %err, "Rejected malformed JSON body");
        let response = HttpResponse::BadRequest().json(json!({
            "message": "Invalid input"
        }));
        InternalError::from_response(err, response).into()
    })
}

pub fn configure(cfg: &mut web::ServiceConfig, api_prefix: &str) {
    cfg.app_data(json_config());

    cfg.service(
        web::scope(api_prefix)
            // /employees
            .service(
                web::resource("/employees")
                    .route(web::get().to(employee::list_employees))
                    .route(web::post().to(employee::create_employee)),
            )
            // /employees/{id}
            .service(
                web::resource("/employees/{id}")
                    .route(web::get().to(employee::get_employee))
                    .route(web::delete().to(employee::delete_employee)),
            )
            // /attendance?employeeId=
            .service(
                web::resource("/attendance")
                    .route(web::get().to(attendance::list_attendance))
                    .route(web::post().to(attendance::mark_attendance)),
            ),
    );
}
