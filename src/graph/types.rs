use async_graphql::{InputObject, Object, Result, ID};
use bson::DateTime;
use time::format_description::well_known::Rfc3339;

use crate::{blogs::model::Blog, users::model::User};

fn format_timestamp(dt: DateTime) -> Result<String> {
    Ok(dt.to_time_0_3().format(&Rfc3339)?)
}

#[Object]
impl User {
    async fn id(&self) -> ID {
        ID(self.id.to_hex())
    }

    async fn username(&self) -> &str {
        &self.username
    }

    async fn email(&self) -> &str {
        &self.email
    }

    async fn created_at(&self) -> Result<String> {
        format_timestamp(self.created_at)
    }

    async fn updated_at(&self) -> Result<Option<String>> {
        self.updated_at.map(format_timestamp).transpose()
    }
}

#[Object]
impl Blog {
    async fn id(&self) -> ID {
        ID(self.id.to_hex())
    }

    async fn title(&self) -> &str {
        &self.title
    }

    async fn content(&self) -> &str {
        &self.content
    }

    async fn author(&self) -> &User {
        &self.author
    }

    async fn created_at(&self) -> Result<String> {
        format_timestamp(self.created_at)
    }

    async fn updated_at(&self) -> Result<Option<String>> {
        self.updated_at.map(format_timestamp).transpose()
    }
}

#[derive(Debug, InputObject)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, InputObject)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug, InputObject)]
pub struct NewBlog {
    pub title: String,
    pub content: String,
}

#[derive(Debug, InputObject)]
pub struct EditBlog {
    pub blog_id: String,
    pub title: String,
    pub content: String,
}

#[derive(Debug, InputObject)]
pub struct DeleteBlog {
    pub blog_id: String,
}
