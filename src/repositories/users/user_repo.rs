//! User repository: persistence seam and MongoDB implementation.

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId, DateTime};
use mongodb::options::ReturnDocument;
use mongodb::Collection;

use crate::db::Database;
use crate::domain::entities::User;
use crate::errors::{AppError, AppResult};

const USERS_COLLECTION: &str = "users";

/// Data access seam for user entities.
///
/// Implemented by [`MongoUserRepository`] for real deployments and by
/// [`crate::repositories::users::InMemoryUserRepository`] for tests and
/// local runs.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persists a new user and returns it with its assigned id.
    async fn create(&self, user: User) -> AppResult<User>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>>;

    /// Records the stored avatar file path and returns the updated user.
    async fn update_avatar(&self, id: &str, file_path: &str) -> AppResult<User>;
}

/// MongoDB-backed user repository.
pub struct MongoUserRepository {
    db: Arc<Database>,
}

impl MongoUserRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<User> {
        self.db.get_database().collection::<User>(USERS_COLLECTION)
    }

    fn parse_id(id: &str) -> AppResult<ObjectId> {
        ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError(format!("Invalid user id: {}", id)))
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn create(&self, mut user: User) -> AppResult<User> {
        let result = self
            .collection()
            .insert_one(&user)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        user.id = result.inserted_id.as_object_id();
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.collection()
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let object_id = Self::parse_id(id)?;

        self.collection()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn update_avatar(&self, id: &str, file_path: &str) -> AppResult<User> {
        let object_id = Self::parse_id(id)?;

        let updated = self
            .collection()
            .find_one_and_update(
                doc! { "_id": object_id },
                doc! {
                    "$set": {
                        "avatar_file_name": file_path,
                        "updated_at": DateTime::now(),
                    }
                },
            )
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        updated.ok_or_else(|| AppError::NotFound(format!("No user found with id {}", id)))
    }
}
