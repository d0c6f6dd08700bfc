// --- File: crates/quadra_booking/src/routes.rs ---

use crate::handlers::{
    create_reservation_handler, delete_reservation_handler, get_reservation_handler,
    list_reservations_handler, update_reservation_handler, BookingState,
};
use axum::{routing::get, Router};
use quadra_db::ReservationRepository;

/// Creates a router containing the public booking routes.
///
/// Paths are relative; the backend nests them under `/api`.
pub fn routes<R>(service: BookingState<R>) -> Router
where
    R: ReservationRepository + 'static,
{
    Router::new()
        .route(
            "/agendamentos",
            get(list_reservations_handler::<R>).post(create_reservation_handler::<R>),
        )
        .route(
            "/agendamentos/{id}",
            get(get_reservation_handler::<R>)
                .put(update_reservation_handler::<R>)
                .delete(delete_reservation_handler::<R>),
        )
        .with_state(service)
}
