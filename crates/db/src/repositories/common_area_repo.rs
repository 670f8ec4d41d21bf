//! Repository for the `common_areas` table.

use condo_core::types::DbId;
use sqlx::PgPool;

use crate::models::common_area::{CommonArea, CreateCommonArea};

const COLUMNS: &str = "id, name, created_at";

pub struct CommonAreaRepo;

impl CommonAreaRepo {
    pub async fn create(pool: &PgPool, input: &CreateCommonArea) -> Result<CommonArea, sqlx::Error> {
        let query = format!("INSERT INTO common_areas (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, CommonArea>(&query)
            .bind(input.name.trim())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<CommonArea>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM common_areas WHERE id = $1");
        sqlx::query_as::<_, CommonArea>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<CommonArea>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM common_areas ORDER BY name");
        sqlx::query_as::<_, CommonArea>(&query).fetch_all(pool).await
    }
}
