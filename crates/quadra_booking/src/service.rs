// --- File: crates/quadra_booking/src/service.rs ---
//! Booking service.
//!
//! Wraps a reservation repository with the booking rules: every write is
//! normalized to a one-hour slot and checked for overlaps before it reaches
//! the store.

use chrono::Local;
use quadra_common::Reservation;
use quadra_db::ReservationRepository;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::logic::{
    conflict_message, find_conflict, is_beyond_current_week, normalize, BookingError,
    ReservationRequest,
};

pub struct BookingService<R> {
    repository: R,
    /// Serializes check-then-write so two overlapping requests can't both pass
    /// the conflict scan.
    write_lock: Mutex<()>,
    /// Reject new bookings after this week's Saturday
    current_week_only: bool,
}

impl<R: ReservationRepository> BookingService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            write_lock: Mutex::new(()),
            current_week_only: false,
        }
    }

    pub fn with_current_week_limit(mut self, enabled: bool) -> Self {
        self.current_week_only = enabled;
        self
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// All reservations, ordered by start time.
    pub async fn list(&self) -> Result<Vec<Reservation>, BookingError> {
        Ok(self.repository.find_all().await?)
    }

    pub async fn get(&self, id: i64) -> Result<Reservation, BookingError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(BookingError::NotFound(id))
    }

    /// Normalizes the request, rejects it on overlap and stores it otherwise.
    ///
    /// A client-supplied `id` or `dataHoraFim` is ignored.
    pub async fn create(&self, request: ReservationRequest) -> Result<Reservation, BookingError> {
        let candidate = normalize(request)?;
        if self.current_week_only
            && is_beyond_current_week(candidate.start_time, Local::now().date_naive())
        {
            debug!("Rejected booking at {}: beyond current week", candidate.start_time);
            return Err(BookingError::BeyondCurrentWeek);
        }
        debug!(
            "Booking request for {} - {}",
            candidate.start_time, candidate.end_time
        );

        let _guard = self.write_lock.lock().await;

        let nearby = self
            .repository
            .find_in_window(candidate.start_time, candidate.end_time)
            .await?;
        if let Some(existing) = find_conflict(&candidate, &nearby, None) {
            warn!(
                "Rejected booking at {}: overlaps reservation {}",
                candidate.start_time, existing.id
            );
            return Err(BookingError::Conflict(conflict_message(existing)));
        }

        let stored = self.repository.insert(candidate).await?;
        info!(
            "Reservation {} booked for {}",
            stored.id, stored.start_time
        );
        Ok(stored)
    }

    /// Replaces reservation `id` with the request after the same normalization
    /// and overlap check as [`create`](Self::create), ignoring the reservation
    /// itself when looking for conflicts.
    pub async fn update(
        &self,
        id: i64,
        request: ReservationRequest,
    ) -> Result<Reservation, BookingError> {
        if let Some(body) = request.id {
            if body != id {
                return Err(BookingError::IdMismatch { path: id, body });
            }
        }
        let candidate = normalize(request)?;

        let _guard = self.write_lock.lock().await;

        if self.repository.find_by_id(id).await?.is_none() {
            return Err(BookingError::NotFound(id));
        }

        let nearby = self
            .repository
            .find_in_window(candidate.start_time, candidate.end_time)
            .await?;
        if let Some(existing) = find_conflict(&candidate, &nearby, Some(id)) {
            warn!(
                "Rejected update of reservation {}: overlaps reservation {}",
                id, existing.id
            );
            return Err(BookingError::Conflict(conflict_message(existing)));
        }

        let updated = candidate.with_id(id);
        if !self.repository.update(updated.clone()).await? {
            return Err(BookingError::NotFound(id));
        }
        info!("Reservation {} moved to {}", id, updated.start_time);
        Ok(updated)
    }

    /// Removes reservation `id` and returns what was removed.
    pub async fn delete(&self, id: i64) -> Result<Reservation, BookingError> {
        let _guard = self.write_lock.lock().await;

        let existing = self.get(id).await?;
        if !self.repository.delete(id).await? {
            return Err(BookingError::NotFound(id));
        }
        info!("Reservation {} deleted", id);
        Ok(existing)
    }
}
