//! Application-wide error types.
//!
//! Unified error handling built on `thiserror` and
//! `actix_web::ResponseError`. Errors that escape a handler are rendered
//! with the same JSON envelope every endpoint uses, so clients can always
//! branch on the `status` field.

use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};
use serde_json::json;
use thiserror::Error;

use crate::utils::api_response::{api_response, ResponseStatus};

/// Application error type covering every layer of the service.
#[derive(Error, Debug)]
pub enum AppError {
    /// Database failures (500)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Input validation failures (400)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Missing resource (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Duplicate resource / business-rule conflict (409)
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// Failed credential check (401)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// Anything else (500)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Renders the error with the uniform response envelope.
    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let body = api_response(
            self.to_string(),
            status,
            ResponseStatus::Error,
            serde_json::Value::Null,
        );

        HttpResponse::build(status).json(body)
    }
}

/// Convenience alias used across services and repositories.
pub type AppResult<T> = Result<T, AppError>;

/// Maps JSON deserialization failures to a 422 envelope.
///
/// Actix rejects malformed bodies before the handler runs, with a plain
/// 400 by default. The API contract instead promises 422 with a
/// field-error mapping, so this handler is installed through
/// `web::JsonConfig` in the route configuration.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let detail = json!({ "errors": { "body": [err.to_string()] } });
    let body = api_response(
        "Invalid request body",
        StatusCode::UNPROCESSABLE_ENTITY,
        ResponseStatus::Error,
        detail,
    );

    actix_web::error::InternalError::from_response(
        err,
        HttpResponse::UnprocessableEntity().json(body),
    )
    .into()
}
