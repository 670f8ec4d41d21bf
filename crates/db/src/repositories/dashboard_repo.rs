//! Aggregate counters for the dashboard.

use chrono::NaiveDate;
use condo_core::work_order::WorkOrderStatus;
use sqlx::PgPool;

use crate::models::dashboard::DashboardStats;

pub struct DashboardRepo;

impl DashboardRepo {
    /// Counters as of `today`. `ordensAbertas` counts orders in `open` status.
    pub async fn stats(pool: &PgPool, today: NaiveDate) -> Result<DashboardStats, sqlx::Error> {
        sqlx::query_as::<_, DashboardStats>(
            "SELECT
                (SELECT COUNT(*) FROM reservations WHERE date = $1) AS reservas_hoje,
                (SELECT COUNT(*) FROM work_orders WHERE status = $2) AS ordens_abertas,
                (SELECT COUNT(*) FROM residents) AS total_moradores,
                (SELECT COUNT(*) FROM units) AS total_unidades",
        )
        .bind(today)
        .bind(WorkOrderStatus::Open.as_str())
        .fetch_one(pool)
        .await
    }
}
