// --- File: crates/services/quadra_backend/src/lib.rs ---

pub mod app_state; // Shared services
pub mod health; // Health probes and endpoint
pub mod router; // Application router
pub mod service_factory; // Service construction from config

pub use app_state::AppState;
pub use router::build_app;
