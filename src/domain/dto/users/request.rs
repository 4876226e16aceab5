//! Request DTOs for the user endpoints.
//!
//! Each struct is bound from a single request body, validated with
//! `validator`, handed to the user service and then discarded.

use serde::Deserialize;
use validator::Validate;

/// Account registration request body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterUserRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Occupation is required"))]
    pub occupation: String,

    #[validate(email(message = "Email must be a valid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Email-availability check request body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EmailCheckRequest {
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: String,
}
