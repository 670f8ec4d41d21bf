//! Repository for the `activity_log` table.

use condo_core::types::DbId;
use sqlx::PgPool;

use crate::models::activity::{ActivityEvent, CreateActivityEvent};

const SELECT: &str = "SELECT a.id, a.event_type, a.entity_type, a.entity_id, a.actor_user_id, \
            u.email AS actor_email, a.payload, a.created_at \
     FROM activity_log a \
     LEFT JOIN users u ON u.id = a.actor_user_id";

pub struct ActivityRepo;

impl ActivityRepo {
    /// Append an entry, returning its id.
    pub async fn insert(pool: &PgPool, input: &CreateActivityEvent) -> Result<DbId, sqlx::Error> {
        let (id,): (DbId,) = sqlx::query_as(
            "INSERT INTO activity_log (event_type, entity_type, entity_id, actor_user_id, payload)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(&input.event_type)
        .bind(&input.entity_type)
        .bind(input.entity_id)
        .bind(input.actor_user_id)
        .bind(&input.payload)
        .fetch_one(pool)
        .await?;
        Ok(id)
    }

    /// Most recent entries first, optionally filtered by event type.
    pub async fn list_recent(
        pool: &PgPool,
        event_type: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ActivityEvent>, sqlx::Error> {
        let query = format!(
            "{SELECT}
             WHERE ($1::TEXT IS NULL OR a.event_type = $1)
             ORDER BY a.created_at DESC, a.id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, ActivityEvent>(&query)
            .bind(event_type)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
