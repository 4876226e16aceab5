//! API route configuration.
//!
//! Registers the user endpoints under `/api/v1` together with the JSON
//! payload error handler and a health check.

use actix_web::web;
use serde_json::json;

use crate::errors::json_error_handler;
use crate::handlers;

/// Registers every route of the application.
///
/// # Examples
///
/// ```rust,ignore
/// use actix_web::{web, App};
///
/// let app = App::new().configure(configure_all_routes);
/// ```
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // Malformed JSON bodies must come back as 422 envelopes, not actix's
    // default 400.
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler));

    cfg.service(health_check);

    configure_user_routes(cfg);
}

/// Registers the user endpoints.
///
/// - `POST /api/v1/register` - account registration
/// - `POST /api/v1/login` - login
/// - `POST /api/v1/email-check` - email availability check
/// - `POST /api/v1/avatars` - avatar upload (multipart)
fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(handlers::users::register_user)
            .service(handlers::users::login)
            .service(handlers::users::check_email_availability)
            .service(handlers::users::upload_avatar),
    );
}

/// Liveness endpoint for load balancers and monitoring.
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "crowdfund_backend",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
