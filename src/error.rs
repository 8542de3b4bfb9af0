use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::utils::field_validation::ValidationErrors;

pub const INTERNAL_ERROR_CODE: &str = "INTERNAL_ERROR";

#[derive(Debug, Display)]
pub enum AppError {
    #[display(fmt = "Validation failed: {}", _0)]
    Validation(ValidationErrors),

    #[display(fmt = "{}", _0)]
    NotFound(String),

    #[display(fmt = "{}", _0)]
    Conflict(String),

    /// The raw cause stays server side; clients only see the incident id.
    #[display(fmt = "Internal Server Error ({}): {}", incident_id, cause)]
    Internal { incident_id: String, cause: String },
}

impl AppError {
    pub fn not_found(domain_rhonda_id: &str) -> Self {
        AppError::NotFound(format!("{domain_rhonda_id} does not exist!"))
    }

    pub fn missing_identifier() -> Self {
        AppError::NotFound("domain_rhonda_id is required in URL".to_string())
    }

    pub fn conflict(domain_rhonda_id: &str) -> Self {
        AppError::Conflict(format!("{domain_rhonda_id} already exist!"))
    }

    pub fn internal(cause: impl ToString) -> Self {
        let incident_id = Uuid::new_v4().to_string();
        let cause = cause.to_string();
        error!(incident_id = %incident_id, error = %cause, "Internal error");
        AppError::Internal { incident_id, cause }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::internal(err)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::Validation(errors) => json!({
                "message": "Validation failed",
                "errors": errors,
            }),
            AppError::NotFound(msg) | AppError::Conflict(msg) => json!({ "message": msg }),
            AppError::Internal { incident_id, .. } => json!({
                "message": "Internal Server Error",
                "code": INTERNAL_ERROR_CODE,
                "incident_id": incident_id,
            }),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
