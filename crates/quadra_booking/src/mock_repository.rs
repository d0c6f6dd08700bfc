//! In-memory reservation repository for unit tests.

use chrono::NaiveDateTime;
use quadra_common::{NewReservation, Reservation};
use quadra_db::{DbError, ReservationRepository};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub struct InMemoryRepository {
    rows: Mutex<Vec<Reservation>>,
    unavailable: AtomicBool,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following call fail as if the pool timed out
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), DbError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DbError::ConnectionError("pool timed out".to_string()));
        }
        Ok(())
    }
}

impl ReservationRepository for InMemoryRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        self.check()
    }

    async fn find_all(&self) -> Result<Vec<Reservation>, DbError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| a.start_time.cmp(&b.start_time).then(a.id.cmp(&b.id)));
        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Reservation>, DbError> {
        self.check()?;
        Ok(self.rows.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    async fn find_in_window(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<Reservation>, DbError> {
        self.check()?;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.start_time < to && r.end_time > from)
            .cloned()
            .collect())
    }

    async fn insert(&self, reservation: NewReservation) -> Result<Reservation, DbError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let id = rows.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let stored = reservation.with_id(id);
        rows.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, reservation: Reservation) -> Result<bool, DbError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|r| r.id == reservation.id) {
            Some(row) => {
                *row = reservation;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, DbError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.id != id);
        Ok(rows.len() != before)
    }

    async fn count(&self) -> Result<i64, DbError> {
        self.check()?;
        Ok(self.rows.lock().unwrap().len() as i64)
    }
}
