//! User management service.
//!
//! Business rules for account registration, credential checks,
//! email-availability lookups and avatar bookkeeping. Handlers depend on
//! the [`UserService`] trait so mock and real implementations can be
//! substituted freely.

use std::sync::Arc;

use async_trait::async_trait;
use bcrypt::{hash, verify};
use log::{info, warn};

use crate::domain::dto::users::{EmailCheckRequest, LoginRequest, RegisterUserRequest};
use crate::domain::entities::User;
use crate::errors::{AppError, AppResult};
use crate::repositories::users::UserRepository;

/// Capability interface consumed by the user handlers.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Registers a new account. Fails on duplicate email.
    async fn register_user(&self, input: RegisterUserRequest) -> AppResult<User>;

    /// Authenticates by email and password.
    async fn login_user(&self, input: LoginRequest) -> AppResult<User>;

    /// Returns whether the address is free to register.
    async fn is_email_available(&self, input: EmailCheckRequest) -> AppResult<bool>;

    /// Records the stored avatar path on the user.
    async fn save_avatar(&self, user_id: &str, file_path: &str) -> AppResult<User>;
}

/// Production implementation of [`UserService`] over a [`UserRepository`].
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
    bcrypt_cost: u32,
}

impl UserManager {
    pub fn new(repo: Arc<dyn UserRepository>, bcrypt_cost: u32) -> Self {
        Self { repo, bcrypt_cost }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn register_user(&self, input: RegisterUserRequest) -> AppResult<User> {
        if self.repo.find_by_email(&input.email).await?.is_some() {
            warn!("registration rejected, email already taken: {}", input.email);
            return Err(AppError::ConflictError(
                "Email has been registered".to_string(),
            ));
        }

        let password_hash = hash(&input.password, self.bcrypt_cost)
            .map_err(|e| AppError::InternalError(format!("password hashing failed: {}", e)))?;

        let user = User::new(input.name, input.occupation, input.email, password_hash);
        let created = self.repo.create(user).await?;

        info!("user registered: {}", created.email);
        Ok(created)
    }

    async fn login_user(&self, input: LoginRequest) -> AppResult<User> {
        let user = self
            .repo
            .find_by_email(&input.email)
            .await?
            .ok_or_else(|| {
                AppError::AuthenticationError("No user found with that email".to_string())
            })?;

        let matches = verify(&input.password, &user.password_hash)
            .map_err(|e| AppError::InternalError(format!("password verification failed: {}", e)))?;

        if !matches {
            warn!("failed login attempt for {}", input.email);
            return Err(AppError::AuthenticationError(
                "Email or password is incorrect".to_string(),
            ));
        }

        info!("user logged in: {}", user.email);
        Ok(user)
    }

    async fn is_email_available(&self, input: EmailCheckRequest) -> AppResult<bool> {
        let existing = self.repo.find_by_email(&input.email).await?;
        Ok(existing.is_none())
    }

    async fn save_avatar(&self, user_id: &str, file_path: &str) -> AppResult<User> {
        let updated = self.repo.update_avatar(user_id, file_path).await?;
        info!("avatar updated for user {}", user_id);
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::users::InMemoryUserRepository;

    const TEST_BCRYPT_COST: u32 = 4;

    fn manager() -> UserManager {
        UserManager::new(Arc::new(InMemoryUserRepository::new()), TEST_BCRYPT_COST)
    }

    fn register_input(email: &str) -> RegisterUserRequest {
        RegisterUserRequest {
            name: "Alice".to_string(),
            occupation: "engineer".to_string(),
            email: email.to_string(),
            password: "secret123".to_string(),
        }
    }

    #[actix_web::test]
    async fn register_hashes_password_and_persists() {
        let service = manager();
        let user = service
            .register_user(register_input("alice@example.com"))
            .await
            .unwrap();

        assert!(user.id.is_some());
        assert_ne!(user.password_hash, "secret123");
        assert!(verify("secret123", &user.password_hash).unwrap());
    }

    #[actix_web::test]
    async fn register_rejects_duplicate_email() {
        let service = manager();
        service
            .register_user(register_input("alice@example.com"))
            .await
            .unwrap();

        let result = service
            .register_user(register_input("alice@example.com"))
            .await;
        assert!(matches!(result, Err(AppError::ConflictError(_))));
    }

    #[actix_web::test]
    async fn login_succeeds_with_correct_credentials() {
        let service = manager();
        service
            .register_user(register_input("alice@example.com"))
            .await
            .unwrap();

        let user = service
            .login_user(LoginRequest {
                email: "alice@example.com".to_string(),
                password: "secret123".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(user.email, "alice@example.com");
    }

    #[actix_web::test]
    async fn login_fails_with_wrong_password() {
        let service = manager();
        service
            .register_user(register_input("alice@example.com"))
            .await
            .unwrap();

        let result = service
            .login_user(LoginRequest {
                email: "alice@example.com".to_string(),
                password: "wrong".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
    }

    #[actix_web::test]
    async fn login_fails_for_unknown_email() {
        let service = manager();

        let result = service
            .login_user(LoginRequest {
                email: "ghost@example.com".to_string(),
                password: "whatever".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
    }

    #[actix_web::test]
    async fn email_availability_flips_after_registration() {
        let service = manager();
        let input = EmailCheckRequest {
            email: "alice@example.com".to_string(),
        };

        assert!(service.is_email_available(input.clone()).await.unwrap());

        service
            .register_user(register_input("alice@example.com"))
            .await
            .unwrap();

        assert!(!service.is_email_available(input).await.unwrap());
    }

    #[actix_web::test]
    async fn save_avatar_records_path() {
        let service = manager();
        let user = service
            .register_user(register_input("alice@example.com"))
            .await
            .unwrap();
        let id = user.id_string().unwrap();

        let updated = service
            .save_avatar(&id, "images/7-profile.png")
            .await
            .unwrap();

        assert_eq!(
            updated.avatar_file_name.as_deref(),
            Some("images/7-profile.png")
        );
    }
}
