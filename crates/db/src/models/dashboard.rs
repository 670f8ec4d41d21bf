//! Dashboard summary counters.

use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub reservas_hoje: i64,
    pub ordens_abertas: i64,
    pub total_moradores: i64,
    pub total_unidades: i64,
}
