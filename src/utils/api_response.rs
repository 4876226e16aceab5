//! Uniform JSON response envelope.
//!
//! Every endpoint replies with the same shape so clients can branch on
//! `status` without caring which operation they called:
//!
//! ```json
//! {
//!   "message": "Success Register",
//!   "code": 200,
//!   "status": "success",
//!   "data": { }
//! }
//! ```

use std::collections::HashMap;

use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::ValidationErrors;

/// Outcome marker carried in every envelope.
///
/// Invariant: `Success` is used exactly when the underlying call
/// succeeded and the HTTP code is in the 2xx range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// The response envelope itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub message: String,
    pub code: u16,
    pub status: ResponseStatus,
    pub data: Value,
}

/// Builds a response envelope.
///
/// This is the single constructor every handler goes through; success and
/// error replies only differ in the arguments passed here.
pub fn api_response(
    message: impl Into<String>,
    code: StatusCode,
    status: ResponseStatus,
    data: Value,
) -> ApiResponse {
    ApiResponse {
        message: message.into(),
        code: code.as_u16(),
        status,
        data,
    }
}

/// Flattens `validator` errors into a `field -> [messages]` map.
///
/// Fields failing several rules collect every message. Rules without a
/// custom message fall back to the validator code name.
pub fn format_validation_error(errors: &ValidationErrors) -> HashMap<String, Vec<String>> {
    errors
        .field_errors()
        .iter()
        .map(|(field, field_errors)| {
            let messages = field_errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}
