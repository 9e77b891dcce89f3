use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde_json::json;
use tracing::error;

use crate::{store::StoreError, utils::validation::ValidationError};

/// Failures surfaced by the resource services.
///
/// Rendered as `{"message": ...}` with 400 for rule failures, 404 for
/// direct lookups by id, and 500 for storage errors (whose details are
/// logged, not returned).
#[derive(Debug, Display)]
pub enum ServiceError {
    #[display(fmt = "{}", _0)]
    Validation(ValidationError),
    #[display(fmt = "Not found.")]
    NotFound,
    #[display(fmt = "storage failure: {}", _0)]
    Storage(StoreError),
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::Validation(err)
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        ServiceError::Storage(err)
    }
}

impl ServiceError {
    fn public_message(&self) -> &'static str {
        match self {
            ServiceError::Validation(err) => err.message(),
            ServiceError::NotFound => "Not found.",
            ServiceError::Storage(_) => "Internal server error",
        }
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound => StatusCode::NOT_FOUND,
            ServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ServiceError::Storage(err) = self {
            error!(error = %err, "Storage operation failed");
        }
        HttpResponse::build(self.status_code()).json(json!({
            "message": self.public_message()
        }))
    }
}
