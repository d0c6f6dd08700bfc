// --- File: crates/quadra_common/src/lib.rs ---

pub mod error; // Error taxonomy
pub mod health; // Health reporting model
pub mod http; // Error to HTTP response mapping
pub mod logging; // Subscriber setup
pub mod models; // Reservation entity and wire formats
pub mod services; // Injected service traits

pub use error::{HttpStatusCode, QuadraError};
pub use health::{HealthCheckResult, HealthReport, HealthStatus};
pub use http::IntoHttpResponse;
pub use models::{NewReservation, Reservation};
