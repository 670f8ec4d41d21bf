//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Parameters for `GET /logs` (`?event_type=&limit=&offset=`).
///
/// `limit` and `offset` are clamped via `condo_core::pagination`.
#[derive(Debug, Default, Deserialize)]
pub struct ActivityListParams {
    pub event_type: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
