//! Reservation model, joined read shape and DTOs.

use chrono::{NaiveDate, NaiveTime};
use condo_core::error::CoreError;
use condo_core::reservation::{parse_date, parse_wall_clock, wall_clock, ReservationStatus, TimeWindow};
use condo_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::unit::UnitRef;

/// A row from the `reservations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Reservation {
    pub id: DbId,
    #[serde(rename = "areaComumId")]
    pub common_area_id: DbId,
    #[serde(rename = "moradorId")]
    pub resident_id: DbId,
    #[serde(rename = "data")]
    pub date: NaiveDate,
    #[serde(rename = "horaInicio", with = "wall_clock")]
    pub start_time: NaiveTime,
    #[serde(rename = "horaFim", with = "wall_clock")]
    pub end_time: NaiveTime,
    #[serde(rename = "createdAt")]
    pub created_at: Timestamp,
}

/// Request body for `POST /reservas`.
///
/// Date and times arrive as strings so a malformed value is reported against
/// its field name instead of as a generic body rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReservation {
    #[serde(rename = "areaComumId")]
    pub common_area_id: DbId,
    #[serde(rename = "moradorId")]
    pub resident_id: DbId,
    #[serde(rename = "data")]
    pub date: String,
    #[serde(rename = "horaInicio")]
    pub start_time: String,
    #[serde(rename = "horaFim")]
    pub end_time: String,
}

/// A parsed, shape-valid booking request. Conflicts are not checked yet.
#[derive(Debug, Clone, Copy)]
pub struct NewReservation {
    pub common_area_id: DbId,
    pub resident_id: DbId,
    pub date: NaiveDate,
    pub window: TimeWindow,
}

impl CreateReservation {
    /// Parse the date and times and check `start < end`.
    pub fn parse(&self) -> Result<NewReservation, CoreError> {
        let date = parse_date("data", &self.date)?;
        let start = parse_wall_clock("horaInicio", &self.start_time)?;
        let end = parse_wall_clock("horaFim", &self.end_time)?;
        Ok(NewReservation {
            common_area_id: self.common_area_id,
            resident_id: self.resident_id,
            date,
            window: TimeWindow::new(start, end)?,
        })
    }
}

/// Flat join of a reservation with its area, resident and unit.
#[derive(Debug, Clone, FromRow)]
pub struct ReservationDetailRow {
    pub id: DbId,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub created_at: Timestamp,
    pub common_area_id: DbId,
    pub common_area_name: String,
    pub resident_id: DbId,
    pub resident_name: String,
    pub resident_surname: String,
    pub unit_id: DbId,
    pub unit_block: String,
    pub unit_number: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AreaRef {
    pub id: DbId,
    #[serde(rename = "nome")]
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResidentRef {
    pub id: DbId,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "sobrenome")]
    pub surname: String,
    #[serde(rename = "unidade")]
    pub unit: UnitRef,
}

/// Reservation as returned by the API, with its status derived from the date.
#[derive(Debug, Clone, Serialize)]
pub struct ReservationDetail {
    pub id: DbId,
    #[serde(rename = "data")]
    pub date: NaiveDate,
    #[serde(rename = "horaInicio", with = "wall_clock")]
    pub start_time: NaiveTime,
    #[serde(rename = "horaFim", with = "wall_clock")]
    pub end_time: NaiveTime,
    pub status: ReservationStatus,
    #[serde(rename = "areaComum")]
    pub common_area: AreaRef,
    #[serde(rename = "morador")]
    pub resident: ResidentRef,
    #[serde(rename = "createdAt")]
    pub created_at: Timestamp,
}

impl ReservationDetailRow {
    pub fn into_detail(self, today: NaiveDate) -> ReservationDetail {
        ReservationDetail {
            id: self.id,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            status: ReservationStatus::derive(self.date, today),
            common_area: AreaRef {
                id: self.common_area_id,
                name: self.common_area_name,
            },
            resident: ResidentRef {
                id: self.resident_id,
                name: self.resident_name,
                surname: self.resident_surname,
                unit: UnitRef {
                    id: self.unit_id,
                    block: self.unit_block,
                    number: self.unit_number,
                },
            },
            created_at: self.created_at,
        }
    }
}
