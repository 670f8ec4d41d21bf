//! Handler for the dashboard summary.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use condo_db::repositories::DashboardRepo;

use super::today;
use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/dashboard
pub async fn stats(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let stats = DashboardRepo::stats(&state.pool, today()).await?;
    Ok(Json(DataResponse { data: stats }))
}
