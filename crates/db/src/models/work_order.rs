//! Work order model, joined read shape and DTOs.

use condo_core::types::{DbId, Timestamp};
use condo_core::work_order::Priority;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `work_orders` table.
#[derive(Debug, Clone, FromRow)]
pub struct WorkOrder {
    pub id: DbId,
    pub title: String,
    pub location: String,
    pub priority: String,
    pub status: String,
    pub provider_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Flat join of a work order with its provider.
#[derive(Debug, Clone, FromRow)]
pub struct WorkOrderDetailRow {
    pub id: DbId,
    pub title: String,
    pub location: String,
    pub priority: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub provider_id: DbId,
    pub provider_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProviderRef {
    pub id: DbId,
    #[serde(rename = "nome")]
    pub name: String,
}

/// Work order as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct WorkOrderDetail {
    pub id: DbId,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "local")]
    pub location: String,
    #[serde(rename = "prioridade")]
    pub priority: String,
    pub status: String,
    #[serde(rename = "prestador")]
    pub provider: ProviderRef,
    #[serde(rename = "dataCriacao")]
    pub created_at: Timestamp,
    #[serde(rename = "updatedAt")]
    pub updated_at: Timestamp,
}

impl From<WorkOrderDetailRow> for WorkOrderDetail {
    fn from(row: WorkOrderDetailRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            location: row.location,
            priority: row.priority,
            status: row.status,
            provider: ProviderRef {
                id: row.provider_id,
                name: row.provider_name,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Request body for `POST /ordens-servico`.
///
/// A client-supplied `status` is not part of this type; serde drops it and
/// new orders always start `open`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateWorkOrder {
    #[serde(rename = "titulo")]
    #[validate(length(max = 200))]
    pub title: String,
    #[serde(rename = "local")]
    #[validate(length(max = 200))]
    pub location: String,
    #[serde(rename = "prioridade", default)]
    pub priority: Option<Priority>,
    #[serde(rename = "prestadorId")]
    pub provider_id: DbId,
}

/// Request body for `PATCH /ordens-servico/{id}/status`.
///
/// Kept as a string so unknown values surface as a validation error rather
/// than a body rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateWorkOrderStatus {
    pub status: String,
}

/// A row from the `work_order_status_changes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorkOrderStatusChange {
    pub id: DbId,
    #[serde(rename = "ordemServicoId")]
    pub work_order_id: DbId,
    #[serde(rename = "de")]
    pub from_status: String,
    #[serde(rename = "para")]
    pub to_status: String,
    #[serde(rename = "alteradoPor")]
    pub changed_by: DbId,
    #[serde(rename = "alteradoEm")]
    pub changed_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_ignores_client_status_and_defaults_priority() {
        let body: CreateWorkOrder = serde_json::from_str(
            r#"{"titulo":"Vazamento","local":"Garagem","prestadorId":4,"status":"concluido"}"#,
        )
        .unwrap();
        assert_eq!(body.provider_id, 4);
        assert_eq!(body.priority.unwrap_or_default(), Priority::Low);
    }

    #[test]
    fn create_accepts_portuguese_priority() {
        let body: CreateWorkOrder = serde_json::from_str(
            r#"{"titulo":"Lâmpada","local":"Hall","prioridade":"alta","prestadorId":1}"#,
        )
        .unwrap();
        assert_eq!(body.priority, Some(Priority::High));
    }
}
