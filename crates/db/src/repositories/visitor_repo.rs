//! Repository for the `visitors` table.

use condo_core::error::CoreError;
use condo_core::types::DbId;
use condo_core::visitor::{validate_departure, VisitorStatus};
use sqlx::PgPool;

use crate::models::visitor::{Visitor, VisitorDetailRow};
use crate::DbError;

const COLUMNS: &str = "id, name, unit_id, entry_time, exit_time, status";

const DETAIL_SELECT: &str = "SELECT v.id, v.name, v.entry_time, v.exit_time, v.status, \
            u.id AS unit_id, u.block AS unit_block, u.number AS unit_number \
     FROM visitors v \
     JOIN units u ON u.id = v.unit_id";

pub struct VisitorRepo;

impl VisitorRepo {
    /// Register an entry. The visitor starts `active` with `entry_time = NOW()`.
    pub async fn create(pool: &PgPool, name: &str, unit_id: DbId) -> Result<Visitor, sqlx::Error> {
        let query = format!(
            "INSERT INTO visitors (name, unit_id, status)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Visitor>(&query)
            .bind(name)
            .bind(unit_id)
            .bind(VisitorStatus::Active.as_str())
            .fetch_one(pool)
            .await
    }

    pub async fn find_detailed(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<VisitorDetailRow>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} WHERE v.id = $1");
        sqlx::query_as::<_, VisitorDetailRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Newest entries first.
    pub async fn list_detailed(pool: &PgPool) -> Result<Vec<VisitorDetailRow>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} ORDER BY v.entry_time DESC, v.id DESC");
        sqlx::query_as::<_, VisitorDetailRow>(&query)
            .fetch_all(pool)
            .await
    }

    /// Record a departure. Departing twice is an invalid transition.
    pub async fn depart(pool: &PgPool, id: DbId) -> Result<Visitor, DbError> {
        let mut tx = pool.begin().await?;

        let current: Option<(String,)> =
            sqlx::query_as("SELECT status FROM visitors WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some((current,)) = current else {
            return Err(CoreError::NotFound { entity: "Visitor", id }.into());
        };
        validate_departure(current.parse()?)?;

        let query = format!(
            "UPDATE visitors SET status = $2, exit_time = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let visitor = sqlx::query_as::<_, Visitor>(&query)
            .bind(id)
            .bind(VisitorStatus::Departed.as_str())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(visitor)
    }
}
