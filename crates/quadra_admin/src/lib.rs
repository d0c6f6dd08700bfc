// --- File: crates/quadra_admin/src/lib.rs ---

// Declare modules within this crate
pub mod auth; // Token signing and bearer middleware
pub mod handlers; // Axum handlers for the admin panel
pub mod logic; // Request types and ordering
pub mod routes; // Axum router definition for this crate
#[cfg(feature = "openapi")]
pub mod doc;

// Re-export the routes function to be used by the main backend service
pub use routes::routes;

pub use auth::{AuthError, HmacCredentialService};
pub use handlers::AdminState;
