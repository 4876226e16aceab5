//! Authenticated-identity collaborator.
//!
//! Handlers that act on behalf of a caller resolve the caller's identity
//! through [`IdentityProvider`] instead of assuming one. Until real token
//! authentication lands, [`StaticIdentityProvider`] supplies a configured
//! placeholder identity.

use actix_web::HttpRequest;

use crate::errors::{AppError, AppResult};

/// Identity of the caller behind the current request.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedUser {
    pub user_id: String,
}

/// Resolves the authenticated identity for a request.
pub trait IdentityProvider: Send + Sync {
    fn current_user(&self, req: &HttpRequest) -> AppResult<AuthenticatedUser>;
}

/// Interim provider returning a fixed identity for every request.
///
/// TODO: replace with a JWT-backed provider once the token service exists.
pub struct StaticIdentityProvider {
    user_id: String,
}

impl StaticIdentityProvider {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

impl IdentityProvider for StaticIdentityProvider {
    fn current_user(&self, _req: &HttpRequest) -> AppResult<AuthenticatedUser> {
        if self.user_id.is_empty() {
            return Err(AppError::AuthenticationError(
                "No authenticated user".to_string(),
            ));
        }

        Ok(AuthenticatedUser {
            user_id: self.user_id.clone(),
        })
    }
}
