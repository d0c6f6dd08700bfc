//! Health reporting model.
//!
//! Each probe yields a tagged `HealthCheckResult`; the report status is the
//! worst status among them.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::services::HealthCheck;

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HealthStatus {
    Healthy,
    Warning,
    Unhealthy,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheckResult {
    pub name: String,
    pub status: HealthStatus,
    pub description: String,
}

impl HealthCheckResult {
    pub fn healthy(name: &str, description: impl Into<String>) -> Self {
        Self::new(name, HealthStatus::Healthy, description)
    }

    pub fn warning(name: &str, description: impl Into<String>) -> Self {
        Self::new(name, HealthStatus::Warning, description)
    }

    pub fn unhealthy(name: &str, description: impl Into<String>) -> Self {
        Self::new(name, HealthStatus::Unhealthy, description)
    }

    fn new(name: &str, status: HealthStatus, description: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            status,
            description: description.into(),
        }
    }
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub checks: Vec<HealthCheckResult>,
}

impl HealthReport {
    pub fn from_checks(checks: Vec<HealthCheckResult>) -> Self {
        let status = checks
            .iter()
            .map(|c| c.status)
            .max()
            .unwrap_or(HealthStatus::Healthy);
        Self { status, checks }
    }

    pub fn is_unhealthy(&self) -> bool {
        self.status == HealthStatus::Unhealthy
    }
}

/// Run all probes one after another and aggregate them.
pub async fn run_checks(checks: &[Arc<dyn HealthCheck>]) -> HealthReport {
    let mut results = Vec::with_capacity(checks.len());
    for check in checks {
        results.push(check.check().await);
    }
    HealthReport::from_checks(results)
}
