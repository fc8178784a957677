use std::sync::Arc;

use crate::{
    blogs::repo::{BlogRepo, MongoBlogRepo},
    config::AppConfig,
    db::Gateway,
    users::repo::{MongoUserRepo, UserRepo},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserRepo>,
    pub blogs: Arc<dyn BlogRepo>,
}

impl AppState {
    /// Repositories over an already connected database.
    pub fn from_gateway(config: Arc<AppConfig>, gateway: &Gateway) -> Self {
        Self {
            config,
            users: Arc::new(MongoUserRepo::new(gateway)),
            blogs: Arc::new(MongoBlogRepo::new(gateway)),
        }
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        users: Arc<dyn UserRepo>,
        blogs: Arc<dyn BlogRepo>,
    ) -> Self {
        Self {
            config,
            users,
            blogs,
        }
    }
}

#[cfg(test)]
impl AppState {
    /// Empty in-memory repositories and a fixed signing secret.
    pub fn in_memory() -> Self {
        use crate::{
            config::JwtConfig,
            memory::{MemoryBlogRepo, MemoryUserRepo},
        };

        let config = Arc::new(AppConfig {
            mongo_uri: "mongodb://localhost:27017".into(),
            database_name: "blogql_test".into(),
            jwt: JwtConfig {
                secret: "test".into(),
                ttl_minutes: 5,
            },
            host: "127.0.0.1".into(),
            port: 8080,
        });
        Self::from_parts(
            config,
            Arc::new(MemoryUserRepo::new()),
            Arc::new(MemoryBlogRepo::new()),
        )
    }
}
