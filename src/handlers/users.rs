//! User endpoint handlers.
//!
//! Each handler follows the same three stages: bind and validate the
//! request payload, delegate to the injected [`UserService`], then wrap
//! the outcome in the uniform response envelope.
//!
//! | Method | Path                  | Operation               |
//! |--------|-----------------------|-------------------------|
//! | `POST` | `/api/v1/register`    | account registration    |
//! | `POST` | `/api/v1/login`       | login                   |
//! | `POST` | `/api/v1/email-check` | email availability      |
//! | `POST` | `/api/v1/avatars`     | avatar upload           |
//!
//! Error-detail exposure is intentionally uneven between endpoints: login
//! surfaces the service error message verbatim while register and
//! email-check reply with generic text. That mirrors the upstream API
//! contract and is documented in DESIGN.md rather than harmonized here.

use std::fs;
use std::path::Path;

use actix_multipart::Multipart;
use actix_web::http::StatusCode;
use actix_web::{post, web, HttpRequest, HttpResponse};
use futures_util::{StreamExt, TryStreamExt};
use log::warn;
use serde_json::{json, Value};
use validator::Validate;

use crate::auth::IdentityProvider;
use crate::config::UploadConfig;
use crate::domain::dto::users::{
    EmailCheckRequest, LoginRequest, RegisterUserRequest, UserResponse,
};
use crate::errors::{AppError, AppResult};
use crate::services::users::UserService;
use crate::utils::api_response::{api_response, format_validation_error, ResponseStatus};

/// Session token placeholder.
///
/// TODO: issue a real token once the token service lands.
const PLACEHOLDER_TOKEN: &str = "tokentokentoken";

/// Registers a new user account.
///
/// # Endpoint
/// `POST /api/v1/register`
///
/// Validation failure replies 422 with a field-error map; a rejected
/// registration replies 400 without detail; success replies 200 with the
/// formatted user and placeholder token.
#[post("/register")]
pub async fn register_user(
    service: web::Data<dyn UserService>,
    payload: web::Json<RegisterUserRequest>,
) -> HttpResponse {
    if let Err(errors) = payload.validate() {
        let detail = json!({ "errors": format_validation_error(&errors) });
        let body = api_response(
            "Register account failed",
            StatusCode::UNPROCESSABLE_ENTITY,
            ResponseStatus::Error,
            detail,
        );
        return HttpResponse::UnprocessableEntity().json(body);
    }

    match service.register_user(payload.into_inner()).await {
        Ok(user) => {
            let formatter = UserResponse::from_user(&user, PLACEHOLDER_TOKEN);
            let body = api_response(
                "Success Register",
                StatusCode::OK,
                ResponseStatus::Success,
                json!(formatter),
            );
            HttpResponse::Ok().json(body)
        }
        Err(err) => {
            warn!("registration failed: {}", err);
            let body = api_response(
                "Register account failed",
                StatusCode::BAD_REQUEST,
                ResponseStatus::Error,
                Value::Null,
            );
            HttpResponse::BadRequest().json(body)
        }
    }
}

/// Authenticates a user by email and password.
///
/// # Endpoint
/// `POST /api/v1/login`
///
/// A failed credential check replies 422 with the service error message
/// in `data.errors.error`.
#[post("/login")]
pub async fn login(
    service: web::Data<dyn UserService>,
    payload: web::Json<LoginRequest>,
) -> HttpResponse {
    if let Err(errors) = payload.validate() {
        let detail = json!({ "errors": format_validation_error(&errors) });
        let body = api_response(
            "Login failed",
            StatusCode::UNPROCESSABLE_ENTITY,
            ResponseStatus::Error,
            detail,
        );
        return HttpResponse::UnprocessableEntity().json(body);
    }

    match service.login_user(payload.into_inner()).await {
        Ok(user) => {
            let formatter = UserResponse::from_user(&user, PLACEHOLDER_TOKEN);
            let body = api_response(
                "Login success",
                StatusCode::OK,
                ResponseStatus::Success,
                json!(formatter),
            );
            HttpResponse::Ok().json(body)
        }
        Err(err) => {
            let detail = json!({ "errors": { "error": err.to_string() } });
            let body = api_response(
                "Login failed",
                StatusCode::UNPROCESSABLE_ENTITY,
                ResponseStatus::Error,
                detail,
            );
            HttpResponse::UnprocessableEntity().json(body)
        }
    }
}

/// Checks whether an email address is free to register.
///
/// # Endpoint
/// `POST /api/v1/email-check`
#[post("/email-check")]
pub async fn check_email_availability(
    service: web::Data<dyn UserService>,
    payload: web::Json<EmailCheckRequest>,
) -> HttpResponse {
    if let Err(errors) = payload.validate() {
        let detail = json!({ "errors": format_validation_error(&errors) });
        let body = api_response(
            "Email checking failed",
            StatusCode::UNPROCESSABLE_ENTITY,
            ResponseStatus::Error,
            detail,
        );
        return HttpResponse::UnprocessableEntity().json(body);
    }

    match service.is_email_available(payload.into_inner()).await {
        Ok(is_available) => {
            let message = if is_available {
                "Email is available"
            } else {
                "Email has been registered"
            };
            let body = api_response(
                message,
                StatusCode::OK,
                ResponseStatus::Success,
                json!({ "is_available": is_available }),
            );
            HttpResponse::Ok().json(body)
        }
        Err(err) => {
            warn!("email check failed: {}", err);
            // Detail suppressed on purpose; clients only see a generic error.
            let detail = json!({ "errors": "Server error" });
            let body = api_response(
                "Email checking failed",
                StatusCode::UNPROCESSABLE_ENTITY,
                ResponseStatus::Error,
                detail,
            );
            HttpResponse::UnprocessableEntity().json(body)
        }
    }
}

/// Stores the caller's avatar image.
///
/// # Endpoint
/// `POST /api/v1/avatars` (multipart, file field `avatar`)
///
/// The caller identity comes from the injected [`IdentityProvider`]. The
/// file is written to `{upload_dir}/{user_id}-{filename}`; a repeated
/// upload to the same constructed path overwrites the previous file.
#[post("/avatars")]
pub async fn upload_avatar(
    req: HttpRequest,
    payload: Multipart,
    service: web::Data<dyn UserService>,
    identity: web::Data<dyn IdentityProvider>,
    uploads: web::Data<UploadConfig>,
) -> Result<HttpResponse, AppError> {
    let caller = identity.current_user(&req)?;

    let (file_name, bytes) = match read_avatar_field(payload).await {
        Ok(Some(field)) => field,
        Ok(None) => {
            warn!("avatar upload without an avatar field");
            return Ok(upload_failed());
        }
        Err(err) => {
            warn!("avatar upload payload unreadable: {}", err);
            return Ok(upload_failed());
        }
    };

    let path = uploads
        .dir()
        .join(format!("{}-{}", caller.user_id, file_name));

    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            warn!("failed to create upload directory {:?}", parent);
            return Ok(upload_failed());
        }
    }

    if let Err(err) = fs::write(&path, &bytes) {
        warn!("failed to store avatar at {:?}: {}", path, err);
        return Ok(upload_failed());
    }

    let stored_path = path.to_string_lossy().into_owned();

    if let Err(err) = service.save_avatar(&caller.user_id, &stored_path).await {
        warn!("failed to record avatar for user {}: {}", caller.user_id, err);
        return Ok(upload_failed());
    }

    let body = api_response(
        "Success to upload avatar",
        StatusCode::OK,
        ResponseStatus::Success,
        json!({ "is_uploaded": true }),
    );
    Ok(HttpResponse::Ok().json(body))
}

/// Reads the `avatar` multipart field into memory.
///
/// Returns `Ok(None)` when the field is absent so the handler can reply
/// without touching the filesystem.
async fn read_avatar_field(mut payload: Multipart) -> AppResult<Option<(String, Vec<u8>)>> {
    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| AppError::ValidationError(e.to_string()))?
    {
        if field.name() != Some("avatar") {
            continue;
        }

        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(sanitize_file_name)
            .unwrap_or_else(|| "avatar".to_string());

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| AppError::ValidationError(e.to_string()))?;
            bytes.extend_from_slice(&chunk);
        }

        return Ok(Some((file_name, bytes)));
    }

    Ok(None)
}

/// Keeps only the final path component of a client-supplied filename.
fn sanitize_file_name(name: &str) -> String {
    Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("avatar")
        .to_string()
}

fn upload_failed() -> HttpResponse {
    let body = api_response(
        "Failed to upload avatar",
        StatusCode::BAD_REQUEST,
        ResponseStatus::Error,
        json!({ "is_uploaded": false }),
    );
    HttpResponse::BadRequest().json(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_directory_components() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("profile.png"), "profile.png");
    }

    #[test]
    fn upload_failure_reply_is_bad_request() {
        let response = upload_failed();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
