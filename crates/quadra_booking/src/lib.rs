// --- File: crates/quadra_booking/src/lib.rs ---
// Declare modules within this crate
pub mod doc;
pub mod handlers;
#[cfg(test)]
mod handlers_test;
pub mod logic;
#[cfg(test)]
mod logic_proptest;
#[cfg(test)]
mod mock_repository;
pub mod routes;
pub mod service;
#[cfg(test)]
mod service_test;

pub use logic::{BookingError, ReservationRequest};
pub use service::BookingService;
