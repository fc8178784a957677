use anyhow::Context;
use async_trait::async_trait;
use bson::{doc, oid::ObjectId, DateTime};
use futures::TryStreamExt;
use mongodb::{
    options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument},
    Collection,
};

use crate::{
    blogs::model::Blog,
    db::{Gateway, BLOG_COLLECTION},
};

#[async_trait]
pub trait BlogRepo: Send + Sync {
    /// All blogs, newest `createdAt` first; ties go to the larger id.
    async fn list_newest_first(&self) -> anyhow::Result<Vec<Blog>>;
    async fn find_by_id(&self, id: ObjectId) -> anyhow::Result<Option<Blog>>;
    async fn insert(&self, blog: &Blog) -> anyhow::Result<ObjectId>;
    /// Sets title, content and `updatedAt` on the blog only if `author_id`
    /// wrote it. Returns the updated document, or `None` when nothing matched.
    async fn update_owned(
        &self,
        id: ObjectId,
        author_id: ObjectId,
        title: &str,
        content: &str,
        updated_at: DateTime,
    ) -> anyhow::Result<Option<Blog>>;
    /// Deletes the blog only if `author_id` wrote it; returns the delete count.
    async fn delete_owned(&self, id: ObjectId, author_id: ObjectId) -> anyhow::Result<u64>;
}

#[derive(Clone)]
pub struct MongoBlogRepo {
    blogs: Collection<Blog>,
}

impl MongoBlogRepo {
    pub fn new(gateway: &Gateway) -> Self {
        Self {
            blogs: gateway.collection(BLOG_COLLECTION),
        }
    }
}

#[async_trait]
impl BlogRepo for MongoBlogRepo {
    async fn list_newest_first(&self) -> anyhow::Result<Vec<Blog>> {
        let options = FindOptions::builder()
            .sort(doc! { "createdAt": -1, "_id": -1 })
            .build();
        let cursor = self
            .blogs
            .find(doc! {}, options)
            .await
            .context("find blogs")?;
        let blogs: Vec<Blog> = cursor.try_collect().await.context("read blogs cursor")?;
        Ok(blogs)
    }

    async fn find_by_id(&self, id: ObjectId) -> anyhow::Result<Option<Blog>> {
        let blog = self
            .blogs
            .find_one(doc! { "_id": id }, None)
            .await
            .context("find blog by id")?;
        Ok(blog)
    }

    async fn insert(&self, blog: &Blog) -> anyhow::Result<ObjectId> {
        let res = self
            .blogs
            .insert_one(blog, None)
            .await
            .context("insert blog")?;
        res.inserted_id
            .as_object_id()
            .context("inserted blog id is not an ObjectId")
    }

    async fn update_owned(
        &self,
        id: ObjectId,
        author_id: ObjectId,
        title: &str,
        content: &str,
        updated_at: DateTime,
    ) -> anyhow::Result<Option<Blog>> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        let blog = self
            .blogs
            .find_one_and_update(
                doc! { "_id": id, "author._id": author_id },
                doc! { "$set": { "title": title, "content": content, "updatedAt": updated_at } },
                options,
            )
            .await
            .context("update blog")?;
        Ok(blog)
    }

    async fn delete_owned(&self, id: ObjectId, author_id: ObjectId) -> anyhow::Result<u64> {
        let res = self
            .blogs
            .delete_one(doc! { "_id": id, "author._id": author_id }, None)
            .await
            .context("delete blog")?;
        Ok(res.deleted_count)
    }
}
