//! SQL implementation of the reservation repository
//!
//! Timestamps are stored as `YYYY-MM-DDTHH:MM:SS` text. That form sorts
//! lexicographically in time order, so the window query compares strings and
//! behaves the same on SQLite and PostgreSQL.

use crate::client::DbBackend;
use crate::error::DbError;
use crate::repositories::reservation::ReservationRepository;
use crate::DbClient;
use chrono::NaiveDateTime;
use quadra_common::models::{format_local_datetime, parse_local_datetime};
use quadra_common::{NewReservation, Reservation};
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error, info};

const SELECT_COLUMNS: &str =
    "SELECT id, responsible_name, contact, neighborhood, start_time, end_time, color FROM reservations";

/// SQL implementation of the reservation repository
#[derive(Debug, Clone)]
pub struct SqlReservationRepository {
    db_client: DbClient,
}

impl SqlReservationRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }

    fn create_table_sql(&self) -> &'static str {
        match self.db_client.backend() {
            DbBackend::Sqlite => {
                r#"
                CREATE TABLE IF NOT EXISTS reservations (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    responsible_name TEXT NOT NULL,
                    contact TEXT NOT NULL DEFAULT '',
                    neighborhood TEXT NOT NULL DEFAULT '',
                    start_time TEXT NOT NULL,
                    end_time TEXT NOT NULL,
                    color TEXT NOT NULL DEFAULT '#3788d8'
                )
                "#
            }
            DbBackend::Postgres => {
                r#"
                CREATE TABLE IF NOT EXISTS reservations (
                    id BIGSERIAL PRIMARY KEY,
                    responsible_name TEXT NOT NULL,
                    contact TEXT NOT NULL DEFAULT '',
                    neighborhood TEXT NOT NULL DEFAULT '',
                    start_time TEXT NOT NULL,
                    end_time TEXT NOT NULL,
                    color TEXT NOT NULL DEFAULT '#3788d8'
                )
                "#
            }
        }
    }
}

fn row_to_reservation(row: &AnyRow) -> Result<Reservation, DbError> {
    let id: i64 = row.try_get("id")?;
    let start_raw: String = row.try_get("start_time")?;
    let end_raw: String = row.try_get("end_time")?;

    let start_time = parse_local_datetime(&start_raw).ok_or_else(|| {
        DbError::CorruptRow(format!("reservation {} has start_time '{}'", id, start_raw))
    })?;
    let end_time = parse_local_datetime(&end_raw).ok_or_else(|| {
        DbError::CorruptRow(format!("reservation {} has end_time '{}'", id, end_raw))
    })?;

    Ok(Reservation {
        id,
        responsible_name: row.try_get("responsible_name")?,
        contact: row.try_get("contact")?,
        neighborhood: row.try_get("neighborhood")?,
        start_time,
        end_time,
        color: row.try_get("color")?,
    })
}

fn rows_to_reservations(rows: Vec<AnyRow>) -> Result<Vec<Reservation>, DbError> {
    rows.iter().map(row_to_reservation).collect()
}

impl ReservationRepository for SqlReservationRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing reservation schema");

        self.db_client.execute(self.create_table_sql()).await?;
        self.db_client
            .execute(
                "CREATE INDEX IF NOT EXISTS idx_reservations_start_time ON reservations (start_time)",
            )
            .await?;

        info!("Reservation schema initialized successfully");
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Reservation>, DbError> {
        debug!("Finding all reservations");

        let query = format!("{} ORDER BY start_time, id", SELECT_COLUMNS);
        let rows = sqlx::query(&query)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to list reservations: {}", e);
                DbError::from_query(e)
            })?;

        rows_to_reservations(rows)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Reservation>, DbError> {
        debug!("Finding reservation {}", id);

        let query = format!("{} WHERE id = $1", SELECT_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to find reservation {}: {}", id, e);
                DbError::from_query(e)
            })?;

        row.as_ref().map(row_to_reservation).transpose()
    }

    async fn find_in_window(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<Reservation>, DbError> {
        debug!("Finding reservations intersecting [{}, {})", from, to);

        let query = format!(
            "{} WHERE start_time < $1 AND end_time > $2 ORDER BY start_time, id",
            SELECT_COLUMNS
        );
        let rows = sqlx::query(&query)
            .bind(format_local_datetime(&to))
            .bind(format_local_datetime(&from))
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to scan reservations for overlap: {}", e);
                DbError::from_query(e)
            })?;

        rows_to_reservations(rows)
    }

    async fn insert(&self, reservation: NewReservation) -> Result<Reservation, DbError> {
        debug!(
            "Inserting reservation for '{}' at {}",
            reservation.responsible_name, reservation.start_time
        );

        let query = r#"
            INSERT INTO reservations (responsible_name, contact, neighborhood, start_time, end_time, color)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
        "#;

        let row = sqlx::query(query)
            .bind(&reservation.responsible_name)
            .bind(&reservation.contact)
            .bind(&reservation.neighborhood)
            .bind(format_local_datetime(&reservation.start_time))
            .bind(format_local_datetime(&reservation.end_time))
            .bind(&reservation.color)
            .fetch_one(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to insert reservation: {}", e);
                DbError::from_query(e)
            })?;

        let id: i64 = row.try_get("id")?;
        info!("Reservation {} created", id);
        Ok(reservation.with_id(id))
    }

    async fn update(&self, reservation: Reservation) -> Result<bool, DbError> {
        debug!("Updating reservation {}", reservation.id);

        let query = r#"
            UPDATE reservations
            SET responsible_name = $1, contact = $2, neighborhood = $3,
                start_time = $4, end_time = $5, color = $6
            WHERE id = $7
        "#;

        let result = sqlx::query(query)
            .bind(&reservation.responsible_name)
            .bind(&reservation.contact)
            .bind(&reservation.neighborhood)
            .bind(format_local_datetime(&reservation.start_time))
            .bind(format_local_datetime(&reservation.end_time))
            .bind(&reservation.color)
            .bind(reservation.id)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to update reservation {}: {}", reservation.id, e);
                DbError::from_query(e)
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool, DbError> {
        debug!("Deleting reservation {}", id);

        let result = sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(id)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to delete reservation {}: {}", id, e);
                DbError::from_query(e)
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64, DbError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM reservations")
            .fetch_one(self.db_client.pool())
            .await
            .map_err(DbError::from_query)?;

        Ok(row.try_get("total")?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    async fn repository() -> SqlReservationRepository {
        let client = DbClient::from_url("sqlite::memory:").await.unwrap();
        let repository = SqlReservationRepository::new(client);
        repository.init_schema().await.unwrap();
        repository
    }

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn new_reservation(name: &str, start: NaiveDateTime) -> NewReservation {
        NewReservation {
            responsible_name: name.to_string(),
            contact: "contato@example.com".to_string(),
            neighborhood: "Centro".to_string(),
            start_time: start,
            end_time: start + Duration::hours(1),
            color: "#3788d8".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_ids_and_round_trips() {
        let repo = repository().await;

        let a = repo.insert(new_reservation("Ana", at(6, 14, 0))).await.unwrap();
        let b = repo.insert(new_reservation("Bruno", at(6, 16, 0))).await.unwrap();
        assert_ne!(a.id, b.id);

        let stored = repo.find_by_id(a.id).await.unwrap().unwrap();
        assert_eq!(stored, a);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_init_schema_is_idempotent() {
        let repo = repository().await;
        repo.insert(new_reservation("Ana", at(6, 14, 0))).await.unwrap();

        repo.init_schema().await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_find_all_is_ordered_by_start() {
        let repo = repository().await;
        repo.insert(new_reservation("Tarde", at(6, 18, 0))).await.unwrap();
        repo.insert(new_reservation("Manhã", at(6, 8, 0))).await.unwrap();
        repo.insert(new_reservation("Véspera", at(5, 20, 0))).await.unwrap();

        let names: Vec<String> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.responsible_name)
            .collect();
        assert_eq!(names, vec!["Véspera", "Manhã", "Tarde"]);
    }

    #[tokio::test]
    async fn test_find_in_window_uses_half_open_intervals() {
        let repo = repository().await;
        let booked = repo.insert(new_reservation("Ana", at(6, 14, 0))).await.unwrap();

        // Touching on either side does not intersect
        assert!(repo.find_in_window(at(6, 15, 0), at(6, 16, 0)).await.unwrap().is_empty());
        assert!(repo.find_in_window(at(6, 13, 0), at(6, 14, 0)).await.unwrap().is_empty());

        let hits = repo.find_in_window(at(6, 14, 30), at(6, 15, 30)).await.unwrap();
        assert_eq!(hits, vec![booked]);
    }

    #[tokio::test]
    async fn test_find_in_window_crosses_midnight() {
        let repo = repository().await;
        let late = repo.insert(new_reservation("Noite", at(6, 23, 30))).await.unwrap();

        let hits = repo.find_in_window(at(7, 0, 0), at(7, 1, 0)).await.unwrap();
        assert_eq!(hits, vec![late]);
    }

    #[tokio::test]
    async fn test_update_and_delete_report_missing_rows() {
        let repo = repository().await;
        let mut stored = repo.insert(new_reservation("Ana", at(6, 14, 0))).await.unwrap();

        stored.color = "#ff0000".to_string();
        assert!(repo.update(stored.clone()).await.unwrap());
        assert_eq!(repo.find_by_id(stored.id).await.unwrap().unwrap().color, "#ff0000");

        let mut ghost = stored.clone();
        ghost.id = stored.id + 100;
        assert!(!repo.update(ghost).await.unwrap());

        assert!(repo.delete(stored.id).await.unwrap());
        assert!(!repo.delete(stored.id).await.unwrap());
        assert!(repo.find_by_id(stored.id).await.unwrap().is_none());
    }
}
