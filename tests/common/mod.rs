#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    extract::FromRef,
    http::{header, Method, Request, StatusCode},
    Router,
};
use blogql::{
    app::build_app,
    auth::{password::hash_password, JwtKeys},
    blogs::model::Blog,
    config::{AppConfig, JwtConfig},
    memory::{MemoryBlogRepo, MemoryUserRepo},
    state::AppState,
    users::model::User,
};
use rand::{distributions::Alphanumeric, Rng};
use serde_json::{json, Value};
use tower::ServiceExt;

pub const PASSWORD: &str = "hunter22";

pub fn random_string(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

pub fn random_email() -> String {
    format!("{}@example.com", random_string(10).to_lowercase())
}

fn test_config() -> AppConfig {
    AppConfig {
        mongo_uri: "mongodb://localhost:27017".into(),
        database_name: "blogql_test".into(),
        jwt: JwtConfig {
            secret: random_string(32),
            ttl_minutes: 5,
        },
        host: "127.0.0.1".into(),
        port: 8080,
    }
}

pub struct TestApp {
    pub state: AppState,
    pub router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let state = AppState::from_parts(
            Arc::new(test_config()),
            Arc::new(MemoryUserRepo::new()),
            Arc::new(MemoryBlogRepo::new()),
        );
        let router = build_app(state.clone());
        Self { state, router }
    }

    pub async fn seed_user(&self) -> User {
        let hash = hash_password(PASSWORD).expect("hash");
        let user = User::new(&random_string(8), &random_email(), hash);
        self.state.users.insert(&user).await.expect("insert user");
        user
    }

    pub async fn seed_blog(&self, author: &User) -> Blog {
        let blog = Blog::new(&random_string(12), &random_string(40), author);
        self.state.blogs.insert(&blog).await.expect("insert blog");
        blog
    }

    pub fn token_for(&self, user: &User) -> String {
        JwtKeys::from_ref(&self.state)
            .issue(&user.id.to_hex())
            .expect("issue token")
    }

    /// Same secret as the app, but already past its expiry.
    pub fn expired_token_for(&self, user: &User) -> String {
        JwtKeys::new(&JwtConfig {
            secret: self.state.config.jwt.secret.clone(),
            ttl_minutes: -5,
        })
        .issue(&user.id.to_hex())
        .expect("issue token")
    }

    pub async fn post_graphql(&self, query: &str, token: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri("/query")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = builder
            .body(Body::from(json!({ "query": query }).to_string()))
            .expect("request");

        let response = self.router.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let body = serde_json::from_slice(&bytes).expect("json body");
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request");
        let response = self.router.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// The exact error envelope returned for a failed root field.
pub fn error_envelope(message: &str, field: &str) -> Value {
    json!({
        "errors": [{ "message": message, "path": [field] }],
        "data": null,
    })
}
