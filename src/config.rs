use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub mongo_uri: String,
    pub database_name: String,
    pub jwt: JwtConfig,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mongo_uri =
            lookup("MONGO_URI").ok_or_else(|| anyhow::anyhow!("MONGO_URI is not set"))?;
        let database_name =
            lookup("DATABASE_NAME").ok_or_else(|| anyhow::anyhow!("DATABASE_NAME is not set"))?;
        let jwt = JwtConfig {
            secret: lookup("JWT_SECRET_KEY").unwrap_or_default(),
            ttl_minutes: lookup("JWT_SECRET_KEY_EXPIRE_MINUTES_COUNT")
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60),
        };
        let host = lookup("APP_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = match lookup("PORT") {
            Some(v) => v
                .parse::<u16>()
                .map_err(|e| anyhow::anyhow!("invalid PORT {v:?}: {e}"))?,
            None => 8080,
        };
        Ok(Self {
            mongo_uri,
            database_name,
            jwt,
            host,
            port,
        })
    }
}
