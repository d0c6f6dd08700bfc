// --- File: crates/services/quadra_backend/src/app_state.rs ---
use quadra_common::services::{CredentialService, HealthCheck};
use quadra_common::QuadraError;
use quadra_config::AppConfig;
use std::sync::Arc;

use crate::service_factory::{QuadraServiceFactory, SqlBookingService};

/// Everything the routers are built from.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub bookings: Arc<SqlBookingService>,
    pub credentials: Arc<dyn CredentialService>,
    pub health_checks: Arc<Vec<Arc<dyn HealthCheck>>>,
}

/// Builder for AppState, mainly so tests can swap single services.
pub struct AppStateBuilder {
    config: Arc<AppConfig>,
    bookings: Option<Arc<SqlBookingService>>,
    credentials: Option<Arc<dyn CredentialService>>,
    health_checks: Vec<Arc<dyn HealthCheck>>,
}

impl AppStateBuilder {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self {
            config,
            bookings: None,
            credentials: None,
            health_checks: Vec::new(),
        }
    }

    /// Take every service from a factory.
    pub fn with_services(mut self, factory: &QuadraServiceFactory) -> Self {
        self.bookings = Some(factory.bookings());
        self.credentials = Some(factory.credentials());
        self.health_checks = factory.health_checks();
        self
    }

    pub fn with_credentials(mut self, credentials: Arc<dyn CredentialService>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn with_health_check(mut self, check: Arc<dyn HealthCheck>) -> Self {
        self.health_checks.push(check);
        self
    }

    pub fn build(self) -> Result<AppState, QuadraError> {
        let bookings = self
            .bookings
            .ok_or_else(|| QuadraError::ConfigError("booking service not set".to_string()))?;
        let credentials = self
            .credentials
            .ok_or_else(|| QuadraError::ConfigError("credential service not set".to_string()))?;

        Ok(AppState {
            config: self.config,
            bookings,
            credentials,
            health_checks: Arc::new(self.health_checks),
        })
    }
}

impl AppState {
    pub fn builder(config: Arc<AppConfig>) -> AppStateBuilder {
        AppStateBuilder::new(config)
    }

    /// Create a new AppState with the given configuration.
    /// Connects to the database and initializes the schema.
    pub async fn new(config: Arc<AppConfig>) -> Result<Self, QuadraError> {
        let factory = QuadraServiceFactory::new(&config).await?;
        Self::builder(config).with_services(&factory).build()
    }
}
