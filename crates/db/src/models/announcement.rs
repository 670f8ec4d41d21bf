//! Announcement (notice board) model and DTOs.

use chrono::NaiveDate;
use condo_core::announcement::AnnouncementFlag;
use condo_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `announcements` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Announcement {
    pub id: DbId,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "data")]
    pub date: NaiveDate,
    pub flag: String,
    #[serde(rename = "createdAt")]
    pub created_at: Timestamp,
}

/// Request body for `POST /avisos`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAnnouncement {
    #[serde(rename = "titulo")]
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(rename = "descricao")]
    #[validate(length(min = 1, max = 5000))]
    pub description: String,
    #[serde(default)]
    pub flag: AnnouncementFlag,
}
