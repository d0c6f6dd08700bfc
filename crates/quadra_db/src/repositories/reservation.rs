//! Repository for reservations
//!
//! Storage interface used by the booking service. It only reads and writes
//! rows; overlap rules live with the caller.

use crate::error::DbError;
use chrono::NaiveDateTime;
use quadra_common::{NewReservation, Reservation};
use std::future::Future;

pub trait ReservationRepository: Send + Sync {
    /// Create the reservations table and its index if they don't exist
    fn init_schema(&self) -> impl Future<Output = Result<(), DbError>> + Send;

    /// All reservations ordered by start time
    fn find_all(&self) -> impl Future<Output = Result<Vec<Reservation>, DbError>> + Send;

    fn find_by_id(
        &self,
        id: i64,
    ) -> impl Future<Output = Result<Option<Reservation>, DbError>> + Send;

    /// Reservations whose interval intersects `[from, to)`, ordered by start time
    fn find_in_window(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> impl Future<Output = Result<Vec<Reservation>, DbError>> + Send;

    /// Store a reservation and return it with its assigned id
    fn insert(
        &self,
        reservation: NewReservation,
    ) -> impl Future<Output = Result<Reservation, DbError>> + Send;

    /// Replace every field of an existing reservation
    ///
    /// Returns `false` when no row has the given id.
    fn update(
        &self,
        reservation: Reservation,
    ) -> impl Future<Output = Result<bool, DbError>> + Send;

    /// Returns `false` when no row has the given id.
    fn delete(&self, id: i64) -> impl Future<Output = Result<bool, DbError>> + Send;

    fn count(&self) -> impl Future<Output = Result<i64, DbError>> + Send;
}
