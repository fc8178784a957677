mod mutation;
mod query;
pub mod types;

use async_graphql::{
    extensions::Tracing, http::GraphiQLSource, EmptySubscription, Schema,
};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{extract::FromRef, extract::State, response::Html};
use tracing::instrument;

pub use mutation::MutationRoot;
pub use query::QueryRoot;

use crate::{
    auth::{JwtKeys, MaybeAuthUser},
    blogs::services::BlogService,
    state::AppState,
    users::services::UserService,
};

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(state: &AppState) -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(UserService::new(state.users.clone(), JwtKeys::from_ref(state)))
        .data(BlogService::new(state.blogs.clone()))
        .extension(Tracing)
        .finish()
}

/// POST /query
#[instrument(skip_all)]
pub async fn graphql_handler(
    State(schema): State<AppSchema>,
    MaybeAuthUser(user): MaybeAuthUser,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = req.into_inner();
    if let Some(user) = user {
        request = request.data(user);
    }
    let mut response = schema.execute(request).await;
    // Clients get `{message, path}` only.
    for err in &mut response.errors {
        err.locations.clear();
    }
    response.into()
}

/// GET / and GET /query
pub async fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint("/query").finish())
}
