//! Error types for the database client

use quadra_common::QuadraError;
use thiserror::Error;

/// Errors that can occur when working with the database client
#[derive(Debug, Error)]
pub enum DbError {
    /// Error from SQLx
    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),

    /// Error with the database configuration
    #[error("Database configuration error: {0}")]
    ConfigError(String),

    /// Error with database URL parsing
    #[error("Database URL error: {0}")]
    UrlError(String),

    /// The database could not be reached
    #[error("Database connection error: {0}")]
    ConnectionError(String),

    /// Error with database pool creation
    #[error("Database pool error: {0}")]
    PoolError(String),

    /// Error with database query
    #[error("Database query error: {0}")]
    QueryError(String),

    /// A stored row could not be mapped back to a model
    #[error("Corrupt row: {0}")]
    CorruptRow(String),
}

impl DbError {
    /// Classify a failed query: connectivity problems are kept apart so the
    /// caller can report the store as unavailable.
    pub fn from_query(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::WorkerCrashed => DbError::ConnectionError(err.to_string()),
            other => DbError::QueryError(other.to_string()),
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, DbError::ConnectionError(_) | DbError::PoolError(_))
    }
}

impl From<DbError> for QuadraError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ConfigError(msg) | DbError::UrlError(msg) => QuadraError::ConfigError(msg),
            err if err.is_unavailable() => QuadraError::StoreUnavailable(err.to_string()),
            err => QuadraError::DatabaseError(err.to_string()),
        }
    }
}
