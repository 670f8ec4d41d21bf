//! Resident model, joined read shape and DTOs.

use condo_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::unit::UnitRef;

/// A row from the `residents` table.
#[derive(Debug, Clone, FromRow)]
pub struct Resident {
    pub id: DbId,
    pub name: String,
    pub surname: String,
    pub document_id: String,
    pub phone: String,
    pub unit_id: DbId,
    pub user_id: DbId,
    pub created_at: Timestamp,
}

/// Flat join of a resident with its unit and credential.
#[derive(Debug, Clone, FromRow)]
pub struct ResidentDetailRow {
    pub id: DbId,
    pub name: String,
    pub surname: String,
    pub document_id: String,
    pub phone: String,
    pub created_at: Timestamp,
    pub unit_id: DbId,
    pub unit_block: String,
    pub unit_number: String,
    pub user_id: DbId,
    pub user_email: String,
    pub user_role: String,
}

/// Credential summary embedded in [`ResidentDetail`].
#[derive(Debug, Clone, Serialize)]
pub struct ResidentUser {
    pub id: DbId,
    pub email: String,
    pub role: String,
}

/// Resident as listed by `GET /moradores`.
#[derive(Debug, Clone, Serialize)]
pub struct ResidentDetail {
    pub id: DbId,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "sobrenome")]
    pub surname: String,
    #[serde(rename = "cpf")]
    pub document_id: String,
    #[serde(rename = "telefone")]
    pub phone: String,
    #[serde(rename = "unidade")]
    pub unit: UnitRef,
    pub user: ResidentUser,
    #[serde(rename = "createdAt")]
    pub created_at: Timestamp,
}

impl From<ResidentDetailRow> for ResidentDetail {
    fn from(row: ResidentDetailRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            surname: row.surname,
            document_id: row.document_id,
            phone: row.phone,
            unit: UnitRef {
                id: row.unit_id,
                block: row.unit_block,
                number: row.unit_number,
            },
            user: ResidentUser {
                id: row.user_id,
                email: row.user_email,
                role: row.user_role,
            },
            created_at: row.created_at,
        }
    }
}

/// DTO for `POST /moradores`: resident data plus login credential.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateResident {
    #[serde(rename = "nome")]
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(rename = "sobrenome")]
    #[validate(length(min = 1, max = 100))]
    pub surname: String,
    pub cpf: String,
    #[serde(rename = "telefone")]
    pub phone: String,
    #[serde(rename = "unidadeId")]
    pub unit_id: DbId,
    #[validate(email)]
    pub email: String,
    #[serde(rename = "senha")]
    pub password: String,
}

/// Normalized insert payload for a resident and its credential.
#[derive(Debug)]
pub struct NewResident {
    pub name: String,
    pub surname: String,
    pub document_id: String,
    pub phone: String,
    pub unit_id: DbId,
    pub email: String,
    pub password_hash: String,
}
