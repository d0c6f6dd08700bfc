//! Database client for Quadra
//!
//! A thin wrapper around an `sqlx::AnyPool`, so the same binary can run on a
//! SQLite file, in-memory SQLite (tests) or PostgreSQL.

use crate::error::DbError;
use quadra_config::{AppConfig, DatabaseConfig};
use sqlx::pool::PoolOptions;
use sqlx::Pool;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

/// SQL dialect behind the `Any` driver, used where DDL differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbBackend {
    Sqlite,
    Postgres,
}

impl DbBackend {
    pub fn from_url(db_url: &str) -> Result<Self, DbError> {
        if db_url.starts_with("sqlite:") {
            Ok(DbBackend::Sqlite)
        } else if db_url.starts_with("postgres:") || db_url.starts_with("postgresql:") {
            Ok(DbBackend::Postgres)
        } else {
            Err(DbError::UrlError(format!(
                "Unsupported database URL scheme: {}",
                db_url.split(':').next().unwrap_or_default()
            )))
        }
    }
}

/// Database client for Quadra
#[derive(Debug, Clone)]
pub struct DbClient {
    /// The database connection pool
    pool: Pool<sqlx::Any>,
    backend: DbBackend,
}

impl DbClient {
    /// Create a new database client from the application configuration
    pub async fn new(config: &Arc<AppConfig>) -> Result<Self, DbError> {
        Self::from_config(&config.database).await
    }

    /// Create a new database client from a database configuration
    ///
    /// # Errors
    ///
    /// * The database URL is empty or has an unsupported scheme
    /// * The database connection fails
    pub async fn from_config(db_config: &DatabaseConfig) -> Result<Self, DbError> {
        if db_config.url.is_empty() {
            return Err(DbError::ConfigError("Database URL is empty".to_string()));
        }
        Self::from_url(&db_config.url).await
    }

    /// Create a new database client from a database URL
    pub async fn from_url(db_url: &str) -> Result<Self, DbError> {
        if db_url.is_empty() {
            return Err(DbError::UrlError("Database URL is empty".to_string()));
        }

        let backend = DbBackend::from_url(db_url)?;
        let pool = Self::create_pool(db_url, backend).await?;

        Ok(Self { pool, backend })
    }

    async fn create_pool(db_url: &str, backend: DbBackend) -> Result<Pool<sqlx::Any>, DbError> {
        debug!("Creating database pool with URL: {}", db_url);

        sqlx::any::install_default_drivers();

        let in_memory = db_url.contains(":memory:");

        // Every pooled connection to sqlite::memory: opens a fresh database,
        // so in-memory stores get exactly one connection that never expires.
        let pool_options = if in_memory {
            PoolOptions::<sqlx::Any>::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(Option::<Duration>::None)
                .max_lifetime(Option::<Duration>::None)
        } else {
            PoolOptions::<sqlx::Any>::new()
                .max_connections(5)
                .idle_timeout(Duration::from_secs(600))
        }
        .acquire_timeout(Duration::from_secs(3));

        if backend == DbBackend::Sqlite && !in_memory {
            Self::ensure_sqlite_file(db_url)?;
        }

        let connect_options = sqlx::any::AnyConnectOptions::from_str(db_url)
            .map_err(|e| DbError::UrlError(e.to_string()))?;

        let pool = pool_options
            .connect_with(connect_options)
            .await
            .map_err(|e| {
                error!("Failed to create database pool: {}", e);
                DbError::PoolError(e.to_string())
            })?;

        info!("Database pool created successfully");
        Ok(pool)
    }

    /// SQLite refuses to open a missing file through the `Any` driver, so the
    /// directory and an empty file are created up front.
    fn ensure_sqlite_file(db_url: &str) -> Result<(), DbError> {
        let db_path = db_url
            .strip_prefix("sqlite://")
            .or_else(|| db_url.strip_prefix("sqlite:"))
            .unwrap_or(db_url);
        // Drop query options such as ?mode=rwc
        let db_path = db_path.split('?').next().unwrap_or(db_path);
        if db_path.is_empty() {
            return Ok(());
        }

        let path = Path::new(db_path);
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                debug!("Creating directory for SQLite database: {:?}", dir);
                std::fs::create_dir_all(dir).map_err(|e| {
                    error!("Failed to create directory for SQLite database: {}", e);
                    DbError::PoolError(format!("Failed to create directory: {}", e))
                })?;
            }
        }

        if !path.exists() {
            debug!("Creating empty SQLite database file: {}", db_path);
            std::fs::File::create(path).map_err(|e| {
                error!("Failed to create SQLite database file: {}", e);
                DbError::PoolError(format!("Failed to create database file: {}", e))
            })?;
        }
        Ok(())
    }

    /// Get the database connection pool
    pub fn pool(&self) -> &Pool<sqlx::Any> {
        &self.pool
    }

    pub fn backend(&self) -> DbBackend {
        self.backend
    }

    /// Execute a statement that returns no rows, yielding the affected row count
    pub async fn execute(&self, query: &str) -> Result<u64, DbError> {
        sqlx::query(query)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected())
            .map_err(DbError::from_query)
    }

    /// Check if the database answers a trivial query
    pub async fn is_healthy(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

impl std::fmt::Display for DbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DbClient({:?})", self.backend)
    }
}
