//! Response DTOs for the user endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::entities::User;

/// Formatted user view returned by register and login.
///
/// Carries only the identity fields clients need plus the externally
/// supplied token; the password hash never leaves the entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub occupation: String,
    pub email: String,
    pub token: String,
}

impl UserResponse {
    /// Formats a user entity together with its session token.
    pub fn from_user(user: &User, token: &str) -> Self {
        Self {
            id: user.id_string().unwrap_or_default(),
            name: user.name.clone(),
            occupation: user.occupation.clone(),
            email: user.email.clone(),
            token: token.to_string(),
        }
    }
}
