//! Unit (apartment) model and DTOs.

use condo_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `units` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Unit {
    pub id: DbId,
    #[serde(rename = "bloco")]
    pub block: String,
    #[serde(rename = "apartamento")]
    pub number: String,
    #[serde(rename = "createdAt")]
    pub created_at: Timestamp,
}

/// Compact unit reference embedded in joined listings.
#[derive(Debug, Clone, Serialize)]
pub struct UnitRef {
    pub id: DbId,
    #[serde(rename = "bloco")]
    pub block: String,
    #[serde(rename = "apartamento")]
    pub number: String,
}

/// DTO for registering a unit.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUnit {
    #[serde(rename = "bloco")]
    #[validate(length(min = 1, max = 20))]
    pub block: String,
    #[serde(rename = "apartamento")]
    #[validate(length(min = 1, max = 20))]
    pub number: String,
}
