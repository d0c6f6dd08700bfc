// --- File: crates/quadra_common/src/services.rs ---
//! Service abstractions shared between crates.
//!
//! These traits keep request handlers independent of concrete implementations
//! so that state can be injected at startup and replaced in tests.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;

use crate::error::QuadraError;
use crate::health::HealthCheckResult;
use crate::models::local_datetime;

/// Type alias for a boxed, sendable future
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Admin credential and session capability.
///
/// Built once at startup from configuration and shared read-only afterwards.
pub trait CredentialService: Send + Sync {
    /// Check a password submitted at login.
    fn verify_password(&self, candidate: &str) -> bool;

    /// Issue a new session token.
    fn issue_token(&self) -> Result<IssuedToken, QuadraError>;

    /// Validate a token presented as `Authorization: Bearer <token>`.
    fn validate_token(&self, token: &str) -> Result<(), QuadraError>;
}

/// A session token handed to the admin panel.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedToken {
    pub token: String,
    /// Expiry in UTC
    #[serde(rename = "expiraEm", with = "local_datetime")]
    #[cfg_attr(
        feature = "openapi",
        schema(value_type = String, example = "2025-01-06T22:00:00")
    )]
    pub expires_at: NaiveDateTime,
}

/// A single probe reported by the health endpoint.
pub trait HealthCheck: Send + Sync {
    fn name(&self) -> &str;

    fn check(&self) -> BoxFuture<'_, HealthCheckResult>;
}
