//! Visitor log model and DTOs.

use condo_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::unit::UnitRef;

/// A row from the `visitors` table.
#[derive(Debug, Clone, FromRow)]
pub struct Visitor {
    pub id: DbId,
    pub name: String,
    pub unit_id: DbId,
    pub entry_time: Timestamp,
    pub exit_time: Option<Timestamp>,
    pub status: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct VisitorDetailRow {
    pub id: DbId,
    pub name: String,
    pub entry_time: Timestamp,
    pub exit_time: Option<Timestamp>,
    pub status: String,
    pub unit_id: DbId,
    pub unit_block: String,
    pub unit_number: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VisitorDetail {
    pub id: DbId,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "dataEntrada")]
    pub entry_time: Timestamp,
    #[serde(rename = "dataSaida")]
    pub exit_time: Option<Timestamp>,
    pub status: String,
    #[serde(rename = "unidade")]
    pub unit: UnitRef,
}

impl From<VisitorDetailRow> for VisitorDetail {
    fn from(row: VisitorDetailRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            entry_time: row.entry_time,
            exit_time: row.exit_time,
            status: row.status,
            unit: UnitRef {
                id: row.unit_id,
                block: row.unit_block,
                number: row.unit_number,
            },
        }
    }
}

/// Request body for `POST /visitantes`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateVisitor {
    #[serde(rename = "nome")]
    #[validate(length(min = 1, max = 150))]
    pub name: String,
    #[serde(rename = "unidadeId")]
    pub unit_id: DbId,
}
