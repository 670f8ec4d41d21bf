use std::sync::Arc;

use condo_events::{BulkMailer, EventBus};

use crate::config::ServerConfig;

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Cheap to clone: everything is behind an `Arc` or is a pool handle.
#[derive(Clone)]
pub struct AppState {
    pub pool: condo_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Activity events published by handlers; persisted to `activity_log`.
    pub event_bus: Arc<EventBus>,
    /// Fire-and-forget bulk email sender.
    pub mailer: BulkMailer,
}
