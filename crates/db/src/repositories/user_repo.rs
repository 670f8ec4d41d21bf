//! Repository for the `users` table.

use condo_core::roles::ROLE_ADMIN;
use condo_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, FailedLogin, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, password_hash, role, is_active, \
                        last_login_at, failed_login_count, locked_until, created_at, updated_at";

/// Provides credential lookups and login bookkeeping.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, password_hash, role)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-insensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE lower(email) = lower($1)");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Count active administrators.
    pub async fn count_active_admins(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM users WHERE role = $1 AND is_active = true")
                .bind(ROLE_ADMIN)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }

    /// Count a wrong password and lock the account once `max_attempts` is
    /// reached.
    ///
    /// An expired lock restarts the count at 1. Counting and locking happen
    /// in one statement, so concurrent failures never read a stale count.
    pub async fn record_failed_login(
        pool: &PgPool,
        id: DbId,
        max_attempts: i32,
        lock_minutes: i32,
    ) -> Result<FailedLogin, sqlx::Error> {
        sqlx::query_as::<_, FailedLogin>(
            "UPDATE users
             SET failed_login_count = CASE
                     WHEN locked_until <= NOW() THEN 1
                     ELSE failed_login_count + 1
                 END,
                 locked_until = CASE
                     WHEN (CASE WHEN locked_until <= NOW() THEN 1
                                ELSE failed_login_count + 1 END) >= $2
                         THEN NOW() + make_interval(mins => $3)
                     WHEN locked_until <= NOW() THEN NULL
                     ELSE locked_until
                 END
             WHERE id = $1
             RETURNING failed_login_count, locked_until",
        )
        .bind(id)
        .bind(max_attempts)
        .bind(lock_minutes)
        .fetch_one(pool)
        .await
    }

    /// Record a successful login: clear the failure counter and lock, stamp
    /// `last_login_at`.
    pub async fn record_successful_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users
             SET failed_login_count = 0, locked_until = NULL, last_login_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }
}
