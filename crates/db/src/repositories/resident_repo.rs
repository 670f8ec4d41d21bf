//! Repository for the `residents` table.

use condo_core::roles::ROLE_RESIDENT;
use condo_core::types::DbId;
use sqlx::PgPool;

use crate::models::resident::{NewResident, Resident, ResidentDetailRow};

const COLUMNS: &str = "id, name, surname, document_id, phone, unit_id, user_id, created_at";

const DETAIL_SELECT: &str = "SELECT r.id, r.name, r.surname, r.document_id, r.phone, r.created_at, \
            u.id AS unit_id, u.block AS unit_block, u.number AS unit_number, \
            usr.id AS user_id, usr.email AS user_email, usr.role AS user_role \
     FROM residents r \
     JOIN units u ON u.id = r.unit_id \
     JOIN users usr ON usr.id = r.user_id";

pub struct ResidentRepo;

impl ResidentRepo {
    /// Create the login credential and the resident row in one transaction.
    ///
    /// A duplicate email or CPF aborts both inserts.
    pub async fn create_with_user(
        pool: &PgPool,
        input: &NewResident,
    ) -> Result<Resident, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let (user_id,): (DbId,) = sqlx::query_as(
            "INSERT INTO users (email, password_hash, role) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&input.email)
        .bind(&input.password_hash)
        .bind(ROLE_RESIDENT)
        .fetch_one(&mut *tx)
        .await?;

        let query = format!(
            "INSERT INTO residents (name, surname, document_id, phone, unit_id, user_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let resident = sqlx::query_as::<_, Resident>(&query)
            .bind(&input.name)
            .bind(&input.surname)
            .bind(&input.document_id)
            .bind(&input.phone)
            .bind(input.unit_id)
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(resident)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Resident>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM residents WHERE id = $1");
        sqlx::query_as::<_, Resident>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The resident linked to a login credential, if any.
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Resident>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM residents WHERE user_id = $1");
        sqlx::query_as::<_, Resident>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_detailed(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ResidentDetailRow>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} WHERE r.id = $1");
        sqlx::query_as::<_, ResidentDetailRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All residents with unit and credential, ordered by name.
    pub async fn list_detailed(pool: &PgPool) -> Result<Vec<ResidentDetailRow>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} ORDER BY r.name, r.surname");
        sqlx::query_as::<_, ResidentDetailRow>(&query)
            .fetch_all(pool)
            .await
    }

    /// Delete a resident and its credential.
    ///
    /// Reservations reference residents with `ON DELETE RESTRICT`, so a
    /// resident with booking history cannot be removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let user_id: Option<(DbId,)> =
            sqlx::query_as("DELETE FROM residents WHERE id = $1 RETURNING user_id")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some((user_id,)) = user_id else {
            return Ok(false);
        };

        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Emails of residents whose credential is active. Deduplication is left
    /// to the caller.
    pub async fn active_emails(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT usr.email
             FROM residents r
             JOIN users usr ON usr.id = r.user_id
             WHERE usr.is_active = true",
        )
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(email,)| email).collect())
    }
}
