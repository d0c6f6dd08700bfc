// --- File: crates/quadra_admin/src/logic.rs ---

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use quadra_booking::{BookingError, BookingService};
use quadra_common::models::local_datetime;
use quadra_common::services::IssuedToken;
use quadra_common::Reservation;
use quadra_db::ReservationRepository;
use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

pub const LOGIN_MESSAGE: &str = "Login realizado com sucesso";
pub const DELETE_MESSAGE: &str = "Agendamento removido com sucesso";

/// Body of `POST /admin/login`
#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct LoginRequest {
    #[serde(alias = "senha")]
    #[cfg_attr(feature = "openapi", schema(example = "minha-senha"))]
    pub password: String,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct LoginResponse {
    pub token: String,
    pub message: String,
    /// Expiry in UTC
    #[serde(rename = "expiraEm", with = "local_datetime")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "2025-01-06T22:00:00"))]
    pub expires_at: NaiveDateTime,
}

impl From<IssuedToken> for LoginResponse {
    fn from(issued: IssuedToken) -> Self {
        Self {
            token: issued.token,
            message: LOGIN_MESSAGE.to_string(),
            expires_at: issued.expires_at,
        }
    }
}

fn formatted_date(reservation: &Reservation) -> String {
    reservation.start_time.format("%d/%m/%Y").to_string()
}

fn formatted_time(reservation: &Reservation) -> String {
    format!(
        "{} - {}",
        reservation.start_time.format("%H:%M"),
        reservation.end_time.format("%H:%M")
    )
}

/// A row of the admin table: the reservation plus display strings.
#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AdminReservation {
    #[serde(flatten)]
    pub reservation: Reservation,
    #[serde(rename = "dataFormatada")]
    #[cfg_attr(feature = "openapi", schema(example = "06/01/2025"))]
    pub formatted_date: String,
    #[serde(rename = "horarioFormatado")]
    #[cfg_attr(feature = "openapi", schema(example = "14:00 - 15:00"))]
    pub formatted_time: String,
}

impl From<Reservation> for AdminReservation {
    fn from(reservation: Reservation) -> Self {
        Self {
            formatted_date: formatted_date(&reservation),
            formatted_time: formatted_time(&reservation),
            reservation,
        }
    }
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct RemovedReservation {
    pub id: i64,
    #[serde(rename = "nomeResponsavel")]
    pub responsible_name: String,
    #[serde(rename = "dataHoraInicio", with = "local_datetime")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "2025-01-06T14:00:00"))]
    pub start_time: NaiveDateTime,
    #[serde(rename = "dataFormatada")]
    pub formatted_date: String,
    #[serde(rename = "horarioFormatado")]
    pub formatted_time: String,
}

/// Body of a successful `DELETE /admin/agendamentos/{id}`
#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct DeleteResponse {
    pub message: String,
    #[serde(rename = "agendamentoRemovido")]
    pub removed: RemovedReservation,
}

impl From<Reservation> for DeleteResponse {
    fn from(reservation: Reservation) -> Self {
        Self {
            message: DELETE_MESSAGE.to_string(),
            removed: RemovedReservation {
                id: reservation.id,
                formatted_date: formatted_date(&reservation),
                formatted_time: formatted_time(&reservation),
                responsible_name: reservation.responsible_name,
                start_time: reservation.start_time,
            },
        }
    }
}

/// Dashboard counters
#[derive(Serialize, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct BookingStats {
    #[serde(rename = "totalAgendamentos")]
    pub total: i64,
    /// Starting between this week's Sunday and Saturday
    #[serde(rename = "agendamentosSemana")]
    pub this_week: i64,
    #[serde(rename = "agendamentosHoje")]
    pub today: i64,
}

/// Orders reservations for the admin table: by start time, ties by id.
pub fn sort_by_start(mut reservations: Vec<Reservation>) -> Vec<Reservation> {
    reservations.sort_by(|a, b| a.start_time.cmp(&b.start_time).then(a.id.cmp(&b.id)));
    reservations
}

/// Sunday of the week containing `today`.
pub fn week_start(today: NaiveDate) -> NaiveDate {
    let back = i64::from(today.weekday().num_days_from_sunday());
    today
        .checked_sub_signed(Duration::days(back))
        .unwrap_or(NaiveDate::MIN)
}

/// Counts reservations by start date relative to `today`.
pub async fn booking_stats<R: ReservationRepository>(
    bookings: &BookingService<R>,
    today: NaiveDate,
) -> Result<BookingStats, BookingError> {
    let repository = bookings.repository();
    let total = repository.count().await?;

    let first_day = week_start(today);
    let from = first_day.and_time(NaiveTime::MIN);
    let to = from
        .checked_add_signed(Duration::days(7))
        .unwrap_or(NaiveDateTime::MAX);

    // The window also returns slots that started late on the previous Saturday
    let week: Vec<Reservation> = repository
        .find_in_window(from, to)
        .await?
        .into_iter()
        .filter(|r| r.start_time >= from && r.start_time < to)
        .collect();
    let today_count = week.iter().filter(|r| r.start_time.date() == today).count();

    Ok(BookingStats {
        total,
        this_week: week.len() as i64,
        today: today_count as i64,
    })
}
