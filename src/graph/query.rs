use async_graphql::{Context, Error, Object, Result, ID};

use crate::blogs::{model::Blog, services::BlogService};

#[derive(Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// All blogs, newest first.
    async fn blogs(&self, ctx: &Context<'_>) -> Result<Vec<Blog>> {
        ctx.data::<BlogService>()?
            .list_all()
            .await
            .map_err(|_| Error::new("fetch blogs failed"))
    }

    async fn blog(&self, ctx: &Context<'_>, id: ID) -> Result<Blog> {
        Ok(ctx.data::<BlogService>()?.get_by_id(id.as_str()).await?)
    }
}
