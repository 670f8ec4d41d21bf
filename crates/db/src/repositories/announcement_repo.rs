//! Repository for the `announcements` table.

use condo_core::announcement::AnnouncementFlag;
use condo_core::types::DbId;
use sqlx::PgPool;

use crate::models::announcement::Announcement;

const COLUMNS: &str = "id, title, description, date, flag, created_at";

pub struct AnnouncementRepo;

impl AnnouncementRepo {
    /// Insert an announcement dated today.
    pub async fn create(
        pool: &PgPool,
        title: &str,
        description: &str,
        flag: AnnouncementFlag,
    ) -> Result<Announcement, sqlx::Error> {
        let query = format!(
            "INSERT INTO announcements (title, description, flag)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Announcement>(&query)
            .bind(title)
            .bind(description)
            .bind(flag.as_str())
            .fetch_one(pool)
            .await
    }

    /// Newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Announcement>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM announcements ORDER BY date DESC, id DESC");
        sqlx::query_as::<_, Announcement>(&query).fetch_all(pool).await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
