use bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::users::model::User;

/// Blog document in the `blogs` collection.
///
/// `author` is a copy of the user taken at creation time, not a reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub content: String,
    pub author: User,
    pub created_at: DateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime>,
}

impl Blog {
    pub fn new(title: &str, content: &str, author: &User) -> Self {
        Self {
            id: ObjectId::new(),
            title: title.to_string(),
            content: content.to_string(),
            author: author.author_snapshot(),
            created_at: DateTime::now(),
            updated_at: None,
        }
    }
}
