//! Refresh-token sessions (`user_sessions`).
//!
//! A refresh token is single use: presenting it revokes its row and issues a
//! replacement in the same transaction. Only the SHA-256 of a token is stored.

use condo_core::types::DbId;
use sqlx::PgPool;

use crate::models::session::{CreateSession, UserSession};

const COLUMNS: &str = "id, user_id, refresh_token_hash, expires_at, is_revoked, \
                        user_agent, created_at, updated_at";

const INSERT: &str = "INSERT INTO user_sessions (user_id, refresh_token_hash, expires_at, user_agent)
                      VALUES ($1, $2, $3, $4)";

pub struct SessionRepo;

impl SessionRepo {
    /// Open a session for a fresh login.
    pub async fn create(pool: &PgPool, input: &CreateSession) -> Result<UserSession, sqlx::Error> {
        let query = format!("{INSERT} RETURNING {COLUMNS}");
        sqlx::query_as::<_, UserSession>(&query)
            .bind(input.user_id)
            .bind(&input.refresh_token_hash)
            .bind(input.expires_at)
            .bind(&input.user_agent)
            .fetch_one(pool)
            .await
    }

    /// Look up a session that can still be exchanged: not revoked, not expired.
    pub async fn find_usable(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<UserSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_sessions
             WHERE refresh_token_hash = $1
               AND is_revoked = false
               AND expires_at > NOW()"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(token_hash)
            .fetch_optional(pool)
            .await
    }

    /// Spend session `previous` and open `next` in its place.
    ///
    /// Returns `None` when `previous` was already spent, in which case
    /// nothing is written. Of two concurrent rotations of one token exactly
    /// one gets a new session.
    pub async fn rotate(
        pool: &PgPool,
        previous: DbId,
        next: &CreateSession,
    ) -> Result<Option<UserSession>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let spent = sqlx::query(
            "UPDATE user_sessions SET is_revoked = true
             WHERE id = $1 AND is_revoked = false AND expires_at > NOW()",
        )
        .bind(previous)
        .execute(&mut *tx)
        .await?
        .rows_affected();
        if spent == 0 {
            return Ok(None);
        }

        let query = format!("{INSERT} RETURNING {COLUMNS}");
        let session = sqlx::query_as::<_, UserSession>(&query)
            .bind(next.user_id)
            .bind(&next.refresh_token_hash)
            .bind(next.expires_at)
            .bind(&next.user_agent)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(session))
    }

    /// Revoke every live session of a user. Returns how many were revoked.
    pub async fn revoke_all_for_user(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_sessions SET is_revoked = true
             WHERE user_id = $1 AND is_revoked = false",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete sessions that can never be exchanged again.
    pub async fn purge_stale(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM user_sessions WHERE is_revoked = true OR expires_at <= NOW()")
                .execute(pool)
                .await?;
        Ok(result.rows_affected())
    }
}
