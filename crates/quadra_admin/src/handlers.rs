// --- File: crates/quadra_admin/src/handlers.rs ---

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    response::Json,
};
use chrono::Local;
use quadra_booking::BookingService;
use quadra_common::services::CredentialService;
use quadra_common::QuadraError;
use quadra_db::ReservationRepository;
use std::sync::Arc;
use tracing::{info, warn};

use crate::auth::AuthError;
use crate::logic::{
    booking_stats, sort_by_start, AdminReservation, BookingStats, DeleteResponse, LoginRequest,
    LoginResponse,
};

// --- State for Admin Handlers ---
pub struct AdminState<R> {
    pub credentials: Arc<dyn CredentialService>,
    pub bookings: Arc<BookingService<R>>,
}

// Manual impl: cloning only copies the Arcs, R itself need not be Clone
impl<R> Clone for AdminState<R> {
    fn clone(&self) -> Self {
        Self {
            credentials: self.credentials.clone(),
            bookings: self.bookings.clone(),
        }
    }
}

/// `POST /admin/login`
pub async fn login_handler<R: ReservationRepository>(
    State(state): State<AdminState<R>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, QuadraError> {
    let Json(request) = payload?;

    if !state.credentials.verify_password(&request.password) {
        warn!("Admin login rejected");
        return Err(AuthError::InvalidPassword.into());
    }

    let issued = state.credentials.issue_token()?;
    info!("Admin session issued, valid until {}", issued.expires_at);
    Ok(Json(issued.into()))
}

/// `GET /admin/agendamentos`
pub async fn admin_list_handler<R: ReservationRepository>(
    State(state): State<AdminState<R>>,
) -> Result<Json<Vec<AdminReservation>>, QuadraError> {
    let reservations = state.bookings.list().await?;
    Ok(Json(
        sort_by_start(reservations)
            .into_iter()
            .map(AdminReservation::from)
            .collect(),
    ))
}

/// `GET /admin/estatisticas`
pub async fn admin_stats_handler<R: ReservationRepository>(
    State(state): State<AdminState<R>>,
) -> Result<Json<BookingStats>, QuadraError> {
    let stats = booking_stats(&state.bookings, Local::now().date_naive()).await?;
    Ok(Json(stats))
}

/// `DELETE /admin/agendamentos/{id}`
pub async fn admin_delete_handler<R: ReservationRepository>(
    State(state): State<AdminState<R>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<DeleteResponse>, QuadraError> {
    let Path(id) = id?;
    let removed = state.bookings.delete(id).await?;
    info!("Reservation {} removed from the admin panel", id);
    Ok(Json(removed.into()))
}
