// --- File: crates/quadra_booking/src/logic.rs ---
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use quadra_common::models::{is_storable, local_datetime};
use quadra_common::{NewReservation, QuadraError, Reservation};
use quadra_db::DbError;
use serde::{Deserialize, Deserializer};

// --- Error Handling ---
use thiserror::Error;
#[derive(Error, Debug)]
pub enum BookingError {
    /// Carries the text shown to the visitor
    #[error("{0}")]
    Conflict(String),
    #[error("Agendamento {0} não encontrado.")]
    NotFound(i64),
    #[error("O id do caminho ({path}) é diferente do id do corpo ({body}).")]
    IdMismatch { path: i64, body: i64 },
    #[error("Data/hora de início fora do intervalo permitido.")]
    StartOutOfRange,
    #[error("Não é permitido agendar horários além da semana corrente (até Sábado).")]
    BeyondCurrentWeek,
    #[error("Store error: {0}")]
    Store(#[from] DbError),
}

impl From<BookingError> for QuadraError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::Conflict(msg) => QuadraError::ConflictError(msg),
            err @ BookingError::NotFound(_) => QuadraError::NotFoundError(err.to_string()),
            err @ (BookingError::IdMismatch { .. }
            | BookingError::StartOutOfRange
            | BookingError::BeyondCurrentWeek) => QuadraError::BadRequest(err.to_string()),
            BookingError::Store(db) => db.into(),
        }
    }
}

// --- Constants ---

/// Color used by the calendar when a booking doesn't pick one
pub const DEFAULT_COLOR: &str = "#3788d8";

/// Every reservation lasts exactly one slot
pub const SLOT_DURATION_MINUTES: i64 = 60;

// --- Data Structures ---

/// A reservation as submitted by the calendar UI.
///
/// `dataHoraFim` is accepted but never trusted; the end of the slot is
/// recomputed from `dataHoraInicio`.
#[derive(Deserialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ReservationRequest {
    /// Ignored on create; must match the path on update when present
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(example = 0))]
    pub id: Option<i64>,

    #[serde(rename = "nomeResponsavel", default, deserialize_with = "nullable_string")]
    #[cfg_attr(feature = "openapi", schema(example = "Maria Souza"))]
    pub responsible_name: String,

    #[serde(rename = "contato", default, deserialize_with = "nullable_string")]
    #[cfg_attr(feature = "openapi", schema(example = "(11) 98765-4321"))]
    pub contact: String,

    #[serde(rename = "cidadeBairro", default, deserialize_with = "nullable_string")]
    #[cfg_attr(feature = "openapi", schema(example = "Centro"))]
    pub neighborhood: String,

    #[serde(rename = "dataHoraInicio", with = "local_datetime")]
    #[cfg_attr(
        feature = "openapi",
        schema(value_type = String, example = "2025-01-06T14:00")
    )]
    pub start_time: NaiveDateTime,

    #[serde(rename = "dataHoraFim", default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>))]
    pub end_time: Option<serde_json::Value>,

    #[serde(rename = "cor", default)]
    #[cfg_attr(feature = "openapi", schema(example = "#3788d8"))]
    pub color: Option<String>,
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// --- Normalization ---

/// End of the one-hour slot that starts at `start`.
///
/// `None` when the end would leave the storable year range.
pub fn slot_end(start: NaiveDateTime) -> Option<NaiveDateTime> {
    start
        .checked_add_signed(Duration::minutes(SLOT_DURATION_MINUTES))
        .filter(is_storable)
}

/// Returns the color verbatim, or the default when it is missing or blank.
pub fn normalize_color(color: Option<String>) -> String {
    match color {
        Some(c) if !c.trim().is_empty() => c,
        _ => DEFAULT_COLOR.to_string(),
    }
}

/// Applies slot length and color defaults to a submitted reservation.
pub fn normalize(request: ReservationRequest) -> Result<NewReservation, BookingError> {
    if !is_storable(&request.start_time) {
        return Err(BookingError::StartOutOfRange);
    }
    let end_time = slot_end(request.start_time).ok_or(BookingError::StartOutOfRange)?;
    Ok(NewReservation {
        responsible_name: request.responsible_name,
        contact: request.contact,
        neighborhood: request.neighborhood,
        start_time: request.start_time,
        end_time,
        color: normalize_color(request.color),
    })
}

/// Last bookable day when bookings are limited to the current week: the
/// Saturday of the Sunday-to-Saturday week containing `today`.
pub fn current_week_end(today: NaiveDate) -> NaiveDate {
    let days_left = 6 - i64::from(today.weekday().num_days_from_sunday());
    today
        .checked_add_signed(Duration::days(days_left))
        .unwrap_or(NaiveDate::MAX)
}

pub fn is_beyond_current_week(start: NaiveDateTime, today: NaiveDate) -> bool {
    start.date() > current_week_end(today)
}

// --- Conflict Detection ---

/// Half-open interval intersection: `[a_start, a_end)` against `[b_start, b_end)`.
///
/// Intervals that only touch (`a_end == b_start`) do not overlap.
pub fn overlaps(
    a_start: NaiveDateTime,
    a_end: NaiveDateTime,
    b_start: NaiveDateTime,
    b_end: NaiveDateTime,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// First existing reservation that collides with the candidate, skipping
/// `exclude_id` (the reservation being updated).
pub fn find_conflict<'a>(
    candidate: &NewReservation,
    existing: &'a [Reservation],
    exclude_id: Option<i64>,
) -> Option<&'a Reservation> {
    existing
        .iter()
        .filter(|r| Some(r.id) != exclude_id)
        .find(|r| {
            overlaps(
                candidate.start_time,
                candidate.end_time,
                r.start_time,
                r.end_time,
            )
        })
}

/// Message returned to the visitor when the slot is taken.
pub fn conflict_message(existing: &Reservation) -> String {
    format!(
        "Horário indisponível: já existe um agendamento em {} das {} às {}.",
        existing.start_time.format("%d/%m/%Y"),
        existing.start_time.format("%H:%M"),
        existing.end_time.format("%H:%M"),
    )
}
