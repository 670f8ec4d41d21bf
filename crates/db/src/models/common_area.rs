//! Common area (bookable shared space) model and DTOs.

use condo_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `common_areas` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CommonArea {
    pub id: DbId,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "createdAt")]
    pub created_at: Timestamp,
}

/// DTO for registering a common area.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommonArea {
    #[serde(rename = "nome")]
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}
