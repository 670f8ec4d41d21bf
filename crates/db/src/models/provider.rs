//! Service provider model and DTOs.

use condo_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `providers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Provider {
    pub id: DbId,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "documento")]
    pub document: String,
    #[serde(rename = "especialidade")]
    pub specialty: String,
    #[serde(rename = "empresa")]
    pub company: Option<String>,
    #[serde(rename = "telefone")]
    pub phone: String,
    pub email: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: Timestamp,
}

/// DTO for registering a provider.
///
/// `document` and `phone` may arrive formatted; the handler normalizes them
/// to digits before insert.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProvider {
    #[serde(rename = "nome")]
    #[validate(length(min = 1, max = 150))]
    pub name: String,
    #[serde(rename = "documento")]
    pub document: String,
    #[serde(rename = "especialidade")]
    #[validate(length(min = 1, max = 100))]
    pub specialty: String,
    #[serde(rename = "empresa", default)]
    pub company: Option<String>,
    #[serde(rename = "telefone")]
    pub phone: String,
    #[serde(default)]
    #[validate(email)]
    pub email: Option<String>,
}
