use async_graphql::{Context, Error, Object, Result};
use tracing::warn;

use super::types::{DeleteBlog, EditBlog, LoginInput, NewBlog, NewUser};
use crate::{
    auth::AuthUser,
    blogs::{model::Blog, services::BlogService},
    error::ServiceError,
    users::{model::User, services::UserService},
};

/// Loads the caller named by the request's token, or denies access.
async fn acting_user(ctx: &Context<'_>) -> Result<User> {
    let Some(AuthUser(user_id)) = ctx.data_opt::<AuthUser>() else {
        return Err(ServiceError::AccessDenied.into());
    };
    ctx.data::<UserService>()?
        .get_user_by_id(user_id)
        .await
        .map_err(|e| {
            warn!(error = %e, user_id = %user_id, "token does not name a known user");
            ServiceError::AccessDenied.into()
        })
}

#[derive(Default)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn register(&self, ctx: &Context<'_>, input: NewUser) -> Result<String> {
        Ok(ctx
            .data::<UserService>()?
            .register(&input.username, &input.email, &input.password)
            .await?)
    }

    async fn login(&self, ctx: &Context<'_>, input: LoginInput) -> Result<String> {
        ctx.data::<UserService>()?
            .login(&input.email, &input.password)
            .await
            .map_err(|_| Error::new(ServiceError::AuthenticationFailure.to_string()))
    }

    async fn new_blog(&self, ctx: &Context<'_>, input: NewBlog) -> Result<Blog> {
        let author = acting_user(ctx).await?;
        Ok(ctx
            .data::<BlogService>()?
            .create(&input.title, &input.content, &author)
            .await?)
    }

    async fn edit_blog(&self, ctx: &Context<'_>, input: EditBlog) -> Result<Blog> {
        let requester = acting_user(ctx).await?;
        Ok(ctx
            .data::<BlogService>()?
            .edit(&input.blog_id, &input.title, &input.content, &requester)
            .await?)
    }

    async fn delete_blog(&self, ctx: &Context<'_>, input: DeleteBlog) -> Result<bool> {
        let requester = acting_user(ctx).await?;
        Ok(ctx
            .data::<BlogService>()?
            .delete(&input.blog_id, &requester)
            .await)
    }
}
