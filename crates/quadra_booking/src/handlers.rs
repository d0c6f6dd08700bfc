// File: crates/quadra_booking/src/handlers.rs
use crate::logic::ReservationRequest;
use crate::service::BookingService;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::Json,
};
use quadra_common::{QuadraError, Reservation};
use quadra_db::ReservationRepository;
use std::sync::Arc;
use tracing::debug;

/// Shared state of the booking routes
pub type BookingState<R> = Arc<BookingService<R>>;

/// `GET /agendamentos`
pub async fn list_reservations_handler<R: ReservationRepository>(
    State(service): State<BookingState<R>>,
) -> Result<Json<Vec<Reservation>>, QuadraError> {
    let reservations = service.list().await?;
    debug!("Listing {} reservations", reservations.len());
    Ok(Json(reservations))
}

/// `GET /agendamentos/{id}`
pub async fn get_reservation_handler<R: ReservationRepository>(
    State(service): State<BookingState<R>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Reservation>, QuadraError> {
    let Path(id) = id?;
    Ok(Json(service.get(id).await?))
}

/// `POST /agendamentos`
///
/// Body rejections are answered with 400 rather than axum's default 422.
pub async fn create_reservation_handler<R: ReservationRepository>(
    State(service): State<BookingState<R>>,
    payload: Result<Json<ReservationRequest>, JsonRejection>,
) -> Result<Json<Reservation>, QuadraError> {
    let Json(request) = payload?;
    let stored = service.create(request).await?;
    Ok(Json(stored))
}

/// `PUT /agendamentos/{id}`
pub async fn update_reservation_handler<R: ReservationRepository>(
    State(service): State<BookingState<R>>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ReservationRequest>, JsonRejection>,
) -> Result<StatusCode, QuadraError> {
    let Path(id) = id?;
    let Json(request) = payload?;
    service.update(id, request).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /agendamentos/{id}`
pub async fn delete_reservation_handler<R: ReservationRepository>(
    State(service): State<BookingState<R>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, QuadraError> {
    let Path(id) = id?;
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
