use bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// User document in the `users` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub username: String,
    pub email: String,
    /// Argon2 PHC string; empty in author snapshots.
    #[serde(rename = "password", default, skip_serializing_if = "String::is_empty")]
    pub password_hash: String,
    pub created_at: DateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime>,
}

impl User {
    pub fn new(username: &str, email: &str, password_hash: String) -> Self {
        Self {
            id: ObjectId::new(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
            created_at: DateTime::now(),
            updated_at: None,
        }
    }

    /// Copy embedded into blogs as the author; carries no credentials.
    pub fn author_snapshot(&self) -> Self {
        Self {
            password_hash: String::new(),
            ..self.clone()
        }
    }
}
