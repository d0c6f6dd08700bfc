// --- File: crates/services/quadra_backend/src/service_factory.rs ---
//! Service factory implementation.
//!
//! Builds every service the routers need from the loaded configuration: the
//! database client, the reservation repository and booking service, the admin
//! credential service and the health probes.
use quadra_admin::HmacCredentialService;
use quadra_booking::BookingService;
use quadra_common::services::{CredentialService, HealthCheck};
use quadra_common::QuadraError;
use quadra_config::AppConfig;
use quadra_db::{
    DbClient, DbClientFactory, RepositoryFactory, ReservationRepository,
    ReservationRepositoryFactory, SqlReservationRepository,
};
use std::sync::Arc;
use tracing::info;

use crate::health::{AdminLoginHealthCheck, DatabaseHealthCheck, ReservationStoreHealthCheck};

pub type SqlBookingService = BookingService<SqlReservationRepository>;

pub struct QuadraServiceFactory {
    bookings: Arc<SqlBookingService>,
    credentials: Arc<dyn CredentialService>,
    health_checks: Vec<Arc<dyn HealthCheck>>,
}

impl QuadraServiceFactory {
    /// Connect to the configured database and build all services.
    pub async fn new(config: &Arc<AppConfig>) -> Result<Self, QuadraError> {
        info!("Connecting to database...");
        let client = DbClientFactory::new().from_app_config(config).await?;
        Self::with_db_client(config, client).await
    }

    /// Build all services on an existing client; the schema is created if missing.
    pub async fn with_db_client(
        config: &Arc<AppConfig>,
        client: DbClient,
    ) -> Result<Self, QuadraError> {
        let repository = ReservationRepositoryFactory::new().create_repository(client.clone());
        repository.init_schema().await?;

        let credential_service = HmacCredentialService::from_config(&config.admin);
        let admin_enabled = credential_service.login_enabled();

        let health_checks: Vec<Arc<dyn HealthCheck>> = vec![
            Arc::new(DatabaseHealthCheck::new(client)),
            Arc::new(ReservationStoreHealthCheck::new(repository.clone())),
            Arc::new(AdminLoginHealthCheck::new(admin_enabled)),
        ];

        info!("Services initialized");
        Ok(Self {
            bookings: Arc::new(
                BookingService::new(repository)
                    .with_current_week_limit(config.booking.current_week_only),
            ),
            credentials: Arc::new(credential_service),
            health_checks,
        })
    }

    pub fn bookings(&self) -> Arc<SqlBookingService> {
        self.bookings.clone()
    }

    pub fn credentials(&self) -> Arc<dyn CredentialService> {
        self.credentials.clone()
    }

    pub fn health_checks(&self) -> Vec<Arc<dyn HealthCheck>> {
        self.health_checks.clone()
    }
}
