// --- File: crates/quadra_common/src/models.rs ---

use chrono::{DateTime, Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Wire and storage format for reservation timestamps (local wall-clock time).
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Years that keep the stored text in chronological order
pub const MIN_YEAR: i32 = 0;
pub const MAX_YEAR: i32 = 9999;

/// True when `value` formats to fixed-width `DATETIME_FORMAT` text.
pub fn is_storable(value: &NaiveDateTime) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&value.year())
}

/// Parses a local timestamp as sent by the calendar UI.
///
/// Accepts `YYYY-MM-DDTHH:MM`, `YYYY-MM-DDTHH:MM:SS` (optionally with
/// fractional seconds, `T` or a space as separator) and full RFC 3339
/// timestamps, whose offset is dropped so the wall-clock time is kept.
///
/// Fractional seconds are truncated, matching what the store keeps. Years
/// outside 0000-9999 are rejected.
pub fn parse_local_datetime(raw: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];

    let raw = raw.trim();
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.naive_local())
        })
        .and_then(|dt| dt.with_nanosecond(0))
        .filter(is_storable)
}

pub fn format_local_datetime(value: &NaiveDateTime) -> String {
    value.format(DATETIME_FORMAT).to_string()
}

/// Serde adapter for reservation timestamps.
pub mod local_datetime {
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(super::DATETIME_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_local_datetime(&raw).ok_or_else(|| {
            de::Error::custom(format!(
                "invalid date/time '{}', expected YYYY-MM-DDTHH:MM",
                raw
            ))
        })
    }
}

/// A booked one-hour interval on the court.
///
/// Field names on the wire follow the calendar UI (`nomeResponsavel`,
/// `dataHoraInicio`, ...).
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// Identity assigned by the store
    #[cfg_attr(feature = "openapi", schema(example = 1))]
    pub id: i64,

    #[serde(rename = "nomeResponsavel")]
    #[cfg_attr(feature = "openapi", schema(example = "Maria Souza"))]
    pub responsible_name: String,

    #[serde(rename = "contato")]
    #[cfg_attr(feature = "openapi", schema(example = "(11) 98765-4321"))]
    pub contact: String,

    #[serde(rename = "cidadeBairro")]
    #[cfg_attr(feature = "openapi", schema(example = "Centro"))]
    pub neighborhood: String,

    #[serde(rename = "dataHoraInicio", with = "local_datetime")]
    #[cfg_attr(
        feature = "openapi",
        schema(value_type = String, example = "2025-01-06T14:00:00")
    )]
    pub start_time: NaiveDateTime,

    /// Always `start_time` plus one hour
    #[serde(rename = "dataHoraFim", with = "local_datetime")]
    #[cfg_attr(
        feature = "openapi",
        schema(value_type = String, example = "2025-01-06T15:00:00")
    )]
    pub end_time: NaiveDateTime,

    #[serde(rename = "cor")]
    #[cfg_attr(feature = "openapi", schema(example = "#3788d8"))]
    pub color: String,
}

/// A normalized reservation that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    pub responsible_name: String,
    pub contact: String,
    pub neighborhood: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub color: String,
}

impl NewReservation {
    /// Attach a store-assigned identity.
    pub fn with_id(self, id: i64) -> Reservation {
        Reservation {
            id,
            responsible_name: self.responsible_name,
            contact: self.contact,
            neighborhood: self.neighborhood,
            start_time: self.start_time,
            end_time: self.end_time,
            color: self.color,
        }
    }
}
