//! Repository for the `providers` table.

use condo_core::types::DbId;
use sqlx::PgPool;

use crate::models::provider::{CreateProvider, Provider};

const COLUMNS: &str = "id, name, document, specialty, company, phone, email, created_at";

pub struct ProviderRepo;

impl ProviderRepo {
    /// Insert a provider. `input.document` and `input.phone` must already be
    /// normalized to digits.
    pub async fn create(pool: &PgPool, input: &CreateProvider) -> Result<Provider, sqlx::Error> {
        let query = format!(
            "INSERT INTO providers (name, document, specialty, company, phone, email)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Provider>(&query)
            .bind(input.name.trim())
            .bind(&input.document)
            .bind(input.specialty.trim())
            .bind(&input.company)
            .bind(&input.phone)
            .bind(&input.email)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Provider>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM providers WHERE id = $1");
        sqlx::query_as::<_, Provider>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Provider>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM providers ORDER BY name");
        sqlx::query_as::<_, Provider>(&query).fetch_all(pool).await
    }

    /// Delete a provider. Fails with a foreign-key violation while work
    /// orders reference it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM providers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
