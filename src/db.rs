use std::time::Duration;

use mongodb::{
    bson::{doc, oid::ObjectId},
    options::ClientOptions,
    Client, Collection, Database,
};
use tracing::{error, info};

use crate::error::{ServiceError, ServiceResult};

pub const USER_COLLECTION: &str = "users";
pub const BLOG_COLLECTION: &str = "blogs";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Handle to one MongoDB database.
///
/// Built once at startup and handed to the repositories; the driver pools
/// connections internally, so clones are cheap and share the same client.
#[derive(Clone, Debug)]
pub struct Gateway {
    client: Client,
    database: Database,
}

impl Gateway {
    /// Connects and pings the server, giving up after 30 seconds.
    pub async fn connect(uri: &str, database_name: &str) -> ServiceResult<Self> {
        let mut options = ClientOptions::parse(uri)
            .await
            .map_err(|e| connection_failure(e.to_string()))?;
        options.connect_timeout = Some(CONNECT_TIMEOUT);
        options.server_selection_timeout = Some(CONNECT_TIMEOUT);
        options.app_name.get_or_insert_with(|| "blogql".to_string());

        let client = Client::with_options(options).map_err(|e| connection_failure(e.to_string()))?;
        let database = client.database(database_name);

        tokio::time::timeout(CONNECT_TIMEOUT, database.run_command(doc! { "ping": 1 }, None))
            .await
            .map_err(|_| connection_failure(format!("timed out after {}s", CONNECT_TIMEOUT.as_secs())))?
            .map_err(|e| connection_failure(e.to_string()))?;

        info!(database = database_name, "connected to the database");
        Ok(Self { client, database })
    }

    pub fn collection<T>(&self, name: &str) -> Collection<T> {
        self.database.collection::<T>(name)
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub async fn disconnect(self) {
        self.client.shutdown().await;
        info!("database connection closed");
    }
}

/// Parses a 24-character hex ObjectId.
pub fn parse_object_id(id: &str) -> ServiceResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| ServiceError::InvalidId)
}

fn connection_failure(detail: String) -> ServiceError {
    error!(error = %detail, "database connection failed");
    ServiceError::ConnectionFailure(detail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_object_ids() {
        let id = parse_object_id("62c24f3b4896bb25c21e49b9").expect("valid id");
        assert_eq!(id.to_hex(), "62c24f3b4896bb25c21e49b9");
    }

    #[test]
    fn rejects_malformed_ids() {
        for bad in ["", "123", "not-an-object-id", "62c24f3b4896bb25c21e49bz", "62c24f3b4896bb25c21e49b9a"] {
            assert!(matches!(parse_object_id(bad), Err(ServiceError::InvalidId)), "{bad}");
        }
    }
}
