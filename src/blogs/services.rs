use std::sync::Arc;

use bson::DateTime;
use tracing::{error, info, instrument, warn};

use crate::{
    blogs::{model::Blog, repo::BlogRepo},
    db::parse_object_id,
    error::{ServiceError, ServiceResult},
    users::model::User,
};

/// Blog CRUD. Writes are scoped to the embedded author.
#[derive(Clone)]
pub struct BlogService {
    repo: Arc<dyn BlogRepo>,
}

impl BlogService {
    pub fn new(repo: Arc<dyn BlogRepo>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self))]
    pub async fn list_all(&self) -> ServiceResult<Vec<Blog>> {
        self.repo.list_newest_first().await.map_err(|e| {
            error!(error = %e, "list blogs failed");
            ServiceError::Store(e)
        })
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: &str) -> ServiceResult<Blog> {
        let blog_id = parse_object_id(id)?;
        self.repo
            .find_by_id(blog_id)
            .await?
            .ok_or(ServiceError::NotFound("blog"))
    }

    /// Inserts the blog and returns it as stored.
    #[instrument(skip(self, content, author), fields(author_id = %author.id))]
    pub async fn create(&self, title: &str, content: &str, author: &User) -> ServiceResult<Blog> {
        let blog = Blog::new(title, content, author);

        let blog_id = self.repo.insert(&blog).await.map_err(|e| {
            error!(error = %e, "insert blog failed");
            ServiceError::CreateFailure("blog")
        })?;

        let stored = match self.repo.find_by_id(blog_id).await {
            Ok(Some(b)) => b,
            Ok(None) => {
                error!(blog_id = %blog_id, "inserted blog not readable");
                return Err(ServiceError::CreateFailure("blog"));
            }
            Err(e) => {
                error!(error = %e, blog_id = %blog_id, "re-read blog failed");
                return Err(ServiceError::CreateFailure("blog"));
            }
        };
        info!(blog_id = %stored.id, "blog created");
        Ok(stored)
    }

    /// Updates title and content when `requester` is the author.
    ///
    /// A miss on the id-and-author filter is followed by a lookup on the id
    /// alone to tell a missing blog (`NotFound`) from someone else's
    /// (`AccessDenied`).
    #[instrument(skip(self, content, requester), fields(requester_id = %requester.id))]
    pub async fn edit(
        &self,
        blog_id: &str,
        title: &str,
        content: &str,
        requester: &User,
    ) -> ServiceResult<Blog> {
        let id = parse_object_id(blog_id)?;

        let updated = self
            .repo
            .update_owned(id, requester.id, title, content, DateTime::now())
            .await
            .map_err(|e| {
                error!(error = %e, "update blog failed");
                ServiceError::UpdateFailure
            })?;
        if let Some(blog) = updated {
            info!(blog_id = %blog.id, "blog edited");
            return Ok(blog);
        }

        match self.repo.find_by_id(id).await {
            Ok(Some(_)) => {
                warn!(blog_id = %id, "edit by non-author");
                Err(ServiceError::AccessDenied)
            }
            Ok(None) => Err(ServiceError::NotFound("blog")),
            Err(e) => {
                error!(error = %e, "lookup after missed update failed");
                Err(ServiceError::UpdateFailure)
            }
        }
    }

    /// `true` only when exactly one blog owned by `requester` was removed.
    #[instrument(skip(self, requester), fields(requester_id = %requester.id))]
    pub async fn delete(&self, blog_id: &str, requester: &User) -> bool {
        let Ok(id) = parse_object_id(blog_id) else {
            return false;
        };
        match self.repo.delete_owned(id, requester.id).await {
            Ok(1) => {
                info!(blog_id = %id, "blog deleted");
                true
            }
            Ok(n) => {
                warn!(blog_id = %id, deleted = n, "delete matched no owned blog");
                false
            }
            Err(e) => {
                error!(error = %e, "delete blog failed");
                false
            }
        }
    }
}
