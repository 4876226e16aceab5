//! In-memory user repository.
//!
//! Mutex-guarded map keyed by the hex id. Backs the integration tests and
//! local runs that do not need a real MongoDB instance.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, DateTime};

use crate::domain::entities::User;
use crate::errors::{AppError, AppResult};
use crate::repositories::users::UserRepository;

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, mut user: User) -> AppResult<User> {
        let id = ObjectId::new();
        user.id = Some(id);

        let mut users = self
            .users
            .lock()
            .map_err(|_| AppError::InternalError("user store poisoned".to_string()))?;
        users.insert(id.to_hex(), user.clone());

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self
            .users
            .lock()
            .map_err(|_| AppError::InternalError("user store poisoned".to_string()))?;

        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let users = self
            .users
            .lock()
            .map_err(|_| AppError::InternalError("user store poisoned".to_string()))?;

        Ok(users.get(id).cloned())
    }

    async fn update_avatar(&self, id: &str, file_path: &str) -> AppResult<User> {
        let mut users = self
            .users
            .lock()
            .map_err(|_| AppError::InternalError("user store poisoned".to_string()))?;

        let user = users
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("No user found with id {}", id)))?;

        user.avatar_file_name = Some(file_path.to_string());
        user.updated_at = DateTime::now();

        Ok(user.clone())
    }
}
