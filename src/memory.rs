//! In-memory repositories.
//!
//! Same contracts as the MongoDB repositories, including the compound
//! id-and-author match for edits and deletes. Each map sits behind one
//! lock, so a conditional write is atomic with respect to other writers.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use bson::{oid::ObjectId, DateTime};
use tokio::sync::RwLock;

use crate::{
    blogs::{model::Blog, repo::BlogRepo},
    users::{model::User, repo::UserRepo},
};

#[derive(Debug, Clone, Default)]
pub struct MemoryUserRepo {
    users: Arc<RwLock<HashMap<ObjectId, User>>>,
}

impl MemoryUserRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepo for MemoryUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<ObjectId> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.id) {
            anyhow::bail!("duplicate _id {}", user.id);
        }
        users.insert(user.id, user.clone());
        Ok(user.id)
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: ObjectId) -> anyhow::Result<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryBlogRepo {
    blogs: Arc<RwLock<HashMap<ObjectId, Blog>>>,
}

impl MemoryBlogRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlogRepo for MemoryBlogRepo {
    async fn list_newest_first(&self) -> anyhow::Result<Vec<Blog>> {
        let mut blogs: Vec<Blog> = self.blogs.read().await.values().cloned().collect();
        blogs.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(blogs)
    }

    async fn find_by_id(&self, id: ObjectId) -> anyhow::Result<Option<Blog>> {
        Ok(self.blogs.read().await.get(&id).cloned())
    }

    async fn insert(&self, blog: &Blog) -> anyhow::Result<ObjectId> {
        let mut blogs = self.blogs.write().await;
        if blogs.contains_key(&blog.id) {
            anyhow::bail!("duplicate _id {}", blog.id);
        }
        blogs.insert(blog.id, blog.clone());
        Ok(blog.id)
    }

    async fn update_owned(
        &self,
        id: ObjectId,
        author_id: ObjectId,
        title: &str,
        content: &str,
        updated_at: DateTime,
    ) -> anyhow::Result<Option<Blog>> {
        let mut blogs = self.blogs.write().await;
        let Some(blog) = blogs.get_mut(&id).filter(|b| b.author.id == author_id) else {
            return Ok(None);
        };
        blog.title = title.to_string();
        blog.content = content.to_string();
        blog.updated_at = Some(updated_at);
        Ok(Some(blog.clone()))
    }

    async fn delete_owned(&self, id: ObjectId, author_id: ObjectId) -> anyhow::Result<u64> {
        let mut blogs = self.blogs.write().await;
        let owned = blogs.get(&id).is_some_and(|b| b.author.id == author_id);
        if !owned {
            return Ok(0);
        }
        blogs.remove(&id);
        Ok(1)
    }
}
