//! Repository for the `units` table.

use condo_core::types::DbId;
use sqlx::PgPool;

use crate::models::unit::{CreateUnit, Unit};

const COLUMNS: &str = "id, block, number, created_at";

pub struct UnitRepo;

impl UnitRepo {
    pub async fn create(pool: &PgPool, input: &CreateUnit) -> Result<Unit, sqlx::Error> {
        let query = format!(
            "INSERT INTO units (block, number) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Unit>(&query)
            .bind(input.block.trim())
            .bind(input.number.trim())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Unit>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM units WHERE id = $1");
        sqlx::query_as::<_, Unit>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List units ordered by block, then number.
    pub async fn list(pool: &PgPool) -> Result<Vec<Unit>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM units ORDER BY block, number");
        sqlx::query_as::<_, Unit>(&query).fetch_all(pool).await
    }

    /// Delete a unit. Fails with a foreign-key violation while residents or
    /// visitors reference it. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM units WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
