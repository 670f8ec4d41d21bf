//! Activity log entries written by the event persistence service.

use condo_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from `activity_log`, joined with the actor's email for display.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActivityEvent {
    pub id: DbId,
    pub event_type: String,
    pub entity_type: Option<String>,
    pub entity_id: Option<DbId>,
    pub actor_user_id: Option<DbId>,
    pub actor_email: Option<String>,
    pub payload: serde_json::Value,
    pub created_at: Timestamp,
}

/// Insert payload for an activity entry.
#[derive(Debug, Clone)]
pub struct CreateActivityEvent {
    pub event_type: String,
    pub entity_type: Option<String>,
    pub entity_id: Option<DbId>,
    pub actor_user_id: Option<DbId>,
    pub payload: serde_json::Value,
}
