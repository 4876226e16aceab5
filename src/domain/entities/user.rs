//! User entity.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// A registered campaign backer or campaign owner.
///
/// Stored in the `users` collection. The password hash lives only on the
/// entity; response DTOs never carry it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub occupation: String,
    /// Email address (unique)
    pub email: String,
    /// bcrypt password hash
    pub password_hash: String,
    /// Path of the stored avatar file, once one has been uploaded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_file_name: Option<String>,
    pub role: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl User {
    /// Creates a new user with the default `user` role.
    pub fn new(name: String, occupation: String, email: String, password_hash: String) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            name,
            occupation,
            email,
            password_hash,
            avatar_file_name: None,
            role: "user".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Hex form of the ObjectId, when the entity has been persisted.
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }
}
