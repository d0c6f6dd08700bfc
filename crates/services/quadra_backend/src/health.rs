// --- File: crates/services/quadra_backend/src/health.rs ---
//! Health probes and the `/health` endpoints.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::{DateTime, Utc};
use quadra_common::health::run_checks;
use quadra_common::services::{BoxFuture, HealthCheck};
use quadra_common::{HealthCheckResult, HealthReport, HealthStatus};
use quadra_db::{DbClient, ReservationRepository};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::warn;

pub type HealthChecks = Arc<Vec<Arc<dyn HealthCheck>>>;

/// Pings the database with a trivial query.
pub struct DatabaseHealthCheck {
    client: DbClient,
}

impl DatabaseHealthCheck {
    pub fn new(client: DbClient) -> Self {
        Self { client }
    }
}

impl HealthCheck for DatabaseHealthCheck {
    fn name(&self) -> &str {
        "database"
    }

    fn check(&self) -> BoxFuture<'_, HealthCheckResult> {
        Box::pin(async move {
            if self.client.is_healthy().await {
                HealthCheckResult::healthy(self.name(), format!("{} is reachable", self.client))
            } else {
                HealthCheckResult::unhealthy(self.name(), "database did not answer")
            }
        })
    }
}

/// Confirms the reservations table exists and can be read.
pub struct ReservationStoreHealthCheck<R> {
    repository: R,
}

impl<R: ReservationRepository> ReservationStoreHealthCheck<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

impl<R: ReservationRepository> HealthCheck for ReservationStoreHealthCheck<R> {
    fn name(&self) -> &str {
        "reservations"
    }

    fn check(&self) -> BoxFuture<'_, HealthCheckResult> {
        Box::pin(async move {
            match self.repository.count().await {
                Ok(total) => {
                    HealthCheckResult::healthy(self.name(), format!("{} reservations stored", total))
                }
                Err(e) => HealthCheckResult::unhealthy(self.name(), e.to_string()),
            }
        })
    }
}

/// Reports a warning while admin login is disabled.
pub struct AdminLoginHealthCheck {
    enabled: bool,
}

impl AdminLoginHealthCheck {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl HealthCheck for AdminLoginHealthCheck {
    fn name(&self) -> &str {
        "admin"
    }

    fn check(&self) -> BoxFuture<'_, HealthCheckResult> {
        let result = if self.enabled {
            HealthCheckResult::healthy(self.name(), "admin login enabled")
        } else {
            HealthCheckResult::warning(self.name(), "admin password not configured")
        };
        Box::pin(async move { result })
    }
}

/// `GET /health`: 200 unless some probe is unhealthy, then 503.
pub async fn health_handler(State(checks): State<HealthChecks>) -> Response {
    let report = run_checks(&checks).await;
    if report.is_unhealthy() {
        warn!("Health check failed: {:?}", report.checks);
        (StatusCode::SERVICE_UNAVAILABLE, Json(report)).into_response()
    } else {
        (StatusCode::OK, Json(report)).into_response()
    }
}

/// Body of `/health/live` and `/health/ready`
#[derive(Debug, Serialize)]
pub struct ProbeStatus {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ProbeStatus {
    fn new(status: &'static str, reason: Option<String>) -> Self {
        Self {
            status,
            timestamp: Utc::now(),
            reason,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DetailedHealth {
    #[serde(flatten)]
    pub report: HealthReport,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "durationMs")]
    pub duration_ms: u64,
    pub version: &'static str,
}

/// `GET /health/live`: the process answers.
pub async fn live_handler() -> Json<ProbeStatus> {
    Json(ProbeStatus::new("Alive", None))
}

/// `GET /health/ready`: 200 only when every probe is healthy.
///
/// A disabled admin login keeps the service not ready.
pub async fn ready_handler(State(checks): State<HealthChecks>) -> Response {
    let report = run_checks(&checks).await;
    if report.status == HealthStatus::Healthy {
        return (StatusCode::OK, Json(ProbeStatus::new("Ready", None))).into_response();
    }

    let failing: Vec<String> = report
        .checks
        .iter()
        .filter(|c| c.status != HealthStatus::Healthy)
        .map(|c| format!("{}: {}", c.name, c.description))
        .collect();
    warn!("Readiness check failed: {:?}", failing);
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(ProbeStatus::new("NotReady", Some(failing.join("; ")))),
    )
        .into_response()
}

/// `GET /health/detailed`: the health report with timing and version.
pub async fn detailed_health_handler(State(checks): State<HealthChecks>) -> Response {
    let timestamp = Utc::now();
    let started = Instant::now();
    let report = run_checks(&checks).await;
    let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    let status = if report.is_unhealthy() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };
    let body = DetailedHealth {
        report,
        timestamp,
        duration_ms,
        version: env!("CARGO_PKG_VERSION"),
    };
    (status, Json(body)).into_response()
}
