//! Repository for the `reservations` table.
//!
//! Bookings are checked and inserted inside one transaction holding a
//! transaction-scoped advisory lock keyed on (common area, date), so two
//! concurrent requests for the same area and day are serialized and the
//! second one sees the first one's row. The `ex_reservations_no_overlap`
//! exclusion constraint backs this up at the storage level.

use chrono::{NaiveDate, NaiveTime};
use condo_core::error::CoreError;
use condo_core::reservation::{ensure_available, lock_key, TimeWindow};
use condo_core::types::DbId;
use sqlx::PgPool;

use crate::models::reservation::{NewReservation, Reservation, ReservationDetailRow};
use crate::DbError;

const COLUMNS: &str = "id, common_area_id, resident_id, date, start_time, end_time, created_at";

const DETAIL_SELECT: &str = "SELECT r.id, r.date, r.start_time, r.end_time, r.created_at, \
            a.id AS common_area_id, a.name AS common_area_name, \
            m.id AS resident_id, m.name AS resident_name, m.surname AS resident_surname, \
            u.id AS unit_id, u.block AS unit_block, u.number AS unit_number \
     FROM reservations r \
     JOIN common_areas a ON a.id = r.common_area_id \
     JOIN residents m ON m.id = r.resident_id \
     JOIN units u ON u.id = m.unit_id";

pub struct ReservationRepo;

impl ReservationRepo {
    /// Book a window if it is free.
    ///
    /// Returns [`CoreError::NotFound`] for an unknown area or resident and
    /// [`CoreError::Conflict`] when the window overlaps an existing booking
    /// for the same area and date. Nothing is written on error.
    pub async fn create_checked(
        pool: &PgPool,
        input: &NewReservation,
    ) -> Result<Reservation, DbError> {
        let mut tx = pool.begin().await?;

        let area: Option<(DbId,)> = sqlx::query_as("SELECT id FROM common_areas WHERE id = $1")
            .bind(input.common_area_id)
            .fetch_optional(&mut *tx)
            .await?;
        if area.is_none() {
            return Err(CoreError::NotFound {
                entity: "CommonArea",
                id: input.common_area_id,
            }
            .into());
        }

        let resident: Option<(DbId,)> = sqlx::query_as("SELECT id FROM residents WHERE id = $1")
            .bind(input.resident_id)
            .fetch_optional(&mut *tx)
            .await?;
        if resident.is_none() {
            return Err(CoreError::NotFound {
                entity: "Resident",
                id: input.resident_id,
            }
            .into());
        }

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(lock_key(input.common_area_id, input.date))
            .execute(&mut *tx)
            .await?;

        let booked: Vec<(DbId, NaiveTime, NaiveTime)> = sqlx::query_as(
            "SELECT id, start_time, end_time FROM reservations
             WHERE common_area_id = $1 AND date = $2",
        )
        .bind(input.common_area_id)
        .bind(input.date)
        .fetch_all(&mut *tx)
        .await?;

        let booked = booked
            .into_iter()
            .map(|(id, start, end)| TimeWindow::new(start, end).map(|w| (id, w)))
            .collect::<Result<Vec<_>, _>>()?;
        if let Err(conflict) = ensure_available(input.date, &input.window, booked) {
            tracing::debug!(
                common_area_id = input.common_area_id,
                date = %input.date,
                window = %input.window,
                "Reservation rejected: slot taken",
            );
            return Err(conflict.into());
        }

        let query = format!(
            "INSERT INTO reservations (common_area_id, resident_id, date, start_time, end_time)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let reservation = sqlx::query_as::<_, Reservation>(&query)
            .bind(input.common_area_id)
            .bind(input.resident_id)
            .bind(input.date)
            .bind(input.window.start())
            .bind(input.window.end())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(reservation)
    }

    pub async fn find_detailed(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ReservationDetailRow>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} WHERE r.id = $1");
        sqlx::query_as::<_, ReservationDetailRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All reservations ordered by date, then start time.
    pub async fn list_detailed(pool: &PgPool) -> Result<Vec<ReservationDetailRow>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} ORDER BY r.date, r.start_time, r.id");
        sqlx::query_as::<_, ReservationDetailRow>(&query)
            .fetch_all(pool)
            .await
    }

    /// Bookings for one area on one date, ordered by start time.
    pub async fn list_for_area_on(
        pool: &PgPool,
        common_area_id: DbId,
        date: NaiveDate,
    ) -> Result<Vec<Reservation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reservations
             WHERE common_area_id = $1 AND date = $2
             ORDER BY start_time"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(common_area_id)
            .bind(date)
            .fetch_all(pool)
            .await
    }
}
