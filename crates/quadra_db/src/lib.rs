//! Database integration for Quadra
//!
//! Reservations are persisted through SQLx's `Any` driver, so the service can
//! run on SQLite (default feature) or PostgreSQL (`postgres` feature).
//!
//! # Example
//!
//! ```rust,no_run
//! use quadra_db::{DbClient, ReservationRepository, SqlReservationRepository};
//!
//! async fn setup() -> Result<SqlReservationRepository, quadra_db::DbError> {
//!     let client = DbClient::from_url("sqlite::memory:").await?;
//!     let repository = SqlReservationRepository::new(client);
//!     repository.init_schema().await?;
//!     Ok(repository)
//! }
//! ```

pub mod client;
pub mod error;
pub mod factory;
pub mod repositories;
pub mod repository;

// Re-export the client, factory, and repository traits for ease of use
pub use client::{DbBackend, DbClient};
pub use error::DbError;
pub use factory::DbClientFactory;
pub use repository::RepositoryFactory;

pub use repositories::{
    ReservationRepository, ReservationRepositoryFactory, SqlReservationRepository,
};
