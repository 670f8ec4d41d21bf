//! Handler for the activity log.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use condo_core::pagination::{clamp_limit, clamp_offset};
use condo_db::repositories::ActivityRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::query::ActivityListParams;
use crate::response::DataResponse;
use crate::state::AppState;

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 200;

/// GET /api/v1/logs
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<ActivityListParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(params.offset);

    let events =
        ActivityRepo::list_recent(&state.pool, params.event_type.as_deref(), limit, offset)
            .await?;
    Ok(Json(DataResponse { data: events }))
}
