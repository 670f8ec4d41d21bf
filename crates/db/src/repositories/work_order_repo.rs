//! Repository for the `work_orders` and `work_order_status_changes` tables.

use condo_core::error::CoreError;
use condo_core::types::DbId;
use condo_core::work_order::{validate_transition, Priority, WorkOrderStatus};
use sqlx::PgPool;

use crate::models::work_order::{WorkOrder, WorkOrderDetailRow, WorkOrderStatusChange};
use crate::DbError;

const COLUMNS: &str = "id, title, location, priority, status, provider_id, created_at, updated_at";

const DETAIL_SELECT: &str = "SELECT w.id, w.title, w.location, w.priority, w.status, \
            w.created_at, w.updated_at, p.id AS provider_id, p.name AS provider_name \
     FROM work_orders w \
     JOIN providers p ON p.id = w.provider_id";

const HISTORY_COLUMNS: &str = "id, work_order_id, from_status, to_status, changed_by, changed_at";

pub struct WorkOrderRepo;

impl WorkOrderRepo {
    /// Insert a new work order. The status is always `open`.
    pub async fn create(
        pool: &PgPool,
        title: &str,
        location: &str,
        priority: Priority,
        provider_id: DbId,
    ) -> Result<WorkOrder, sqlx::Error> {
        let query = format!(
            "INSERT INTO work_orders (title, location, priority, status, provider_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkOrder>(&query)
            .bind(title)
            .bind(location)
            .bind(priority.as_str())
            .bind(WorkOrderStatus::Open.as_str())
            .bind(provider_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<WorkOrder>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM work_orders WHERE id = $1");
        sqlx::query_as::<_, WorkOrder>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_detailed(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<WorkOrderDetailRow>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} WHERE w.id = $1");
        sqlx::query_as::<_, WorkOrderDetailRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All work orders, newest first.
    pub async fn list_detailed(pool: &PgPool) -> Result<Vec<WorkOrderDetailRow>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} ORDER BY w.created_at DESC, w.id DESC");
        sqlx::query_as::<_, WorkOrderDetailRow>(&query)
            .fetch_all(pool)
            .await
    }

    /// Move a work order to `next`, recording the change.
    ///
    /// The current row is locked with `FOR UPDATE`, so concurrent transitions
    /// on the same order are validated one after the other. Returns the
    /// previous status alongside the updated row.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        next: WorkOrderStatus,
        changed_by: DbId,
    ) -> Result<(WorkOrderStatus, WorkOrder), DbError> {
        let mut tx = pool.begin().await?;

        let current: Option<(String,)> =
            sqlx::query_as("SELECT status FROM work_orders WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some((current,)) = current else {
            return Err(CoreError::NotFound {
                entity: "WorkOrder",
                id,
            }
            .into());
        };

        let current: WorkOrderStatus = current.parse()?;
        validate_transition(current, next)?;

        let query = format!(
            "UPDATE work_orders SET status = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, WorkOrder>(&query)
            .bind(id)
            .bind(next.as_str())
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO work_order_status_changes (work_order_id, from_status, to_status, changed_by)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(id)
        .bind(current.as_str())
        .bind(next.as_str())
        .bind(changed_by)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok((current, updated))
    }

    /// Status history for one work order, oldest first.
    pub async fn history(
        pool: &PgPool,
        work_order_id: DbId,
    ) -> Result<Vec<WorkOrderStatusChange>, sqlx::Error> {
        let query = format!(
            "SELECT {HISTORY_COLUMNS} FROM work_order_status_changes
             WHERE work_order_id = $1
             ORDER BY changed_at, id"
        );
        sqlx::query_as::<_, WorkOrderStatusChange>(&query)
            .bind(work_order_id)
            .fetch_all(pool)
            .await
    }
}
