//! Factory for creating database clients

use crate::client::DbClient;
use crate::error::DbError;
use quadra_config::AppConfig;
use std::sync::Arc;
use tracing::debug;

/// Factory for creating database clients
#[derive(Debug, Clone)]
pub struct DbClientFactory;

impl DbClientFactory {
    pub fn new() -> Self {
        Self
    }

    /// Create a new database client from an application configuration
    ///
    /// # Errors
    ///
    /// * The database URL is empty or unsupported
    /// * The database connection fails
    pub async fn from_app_config(&self, config: &Arc<AppConfig>) -> Result<DbClient, DbError> {
        debug!("Creating database client from application configuration");
        DbClient::new(config).await
    }

    /// Create a new database client from a database URL
    pub async fn from_url(&self, db_url: &str) -> Result<DbClient, DbError> {
        debug!("Creating database client from URL");
        DbClient::from_url(db_url).await
    }
}

impl Default for DbClientFactory {
    fn default() -> Self {
        Self::new()
    }
}
