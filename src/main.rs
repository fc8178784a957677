use std::sync::Arc;

use blogql::{app, config::AppConfig, db::Gateway, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "blogql=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = Arc::new(AppConfig::from_env()?);
    if config.jwt.secret.is_empty() {
        tracing::warn!("JWT_SECRET_KEY is empty; register and login will fail");
    }

    let gateway = Gateway::connect(&config.mongo_uri, &config.database_name).await?;
    let state = AppState::from_gateway(config.clone(), &gateway);

    let result = app::serve(app::build_app(state), &config).await;
    gateway.disconnect().await;
    result
}
