//! Handlers for the `/users` resource.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use condo_core::error::CoreError;
use condo_core::types::DbId;
use condo_db::models::user::UserResponse;
use condo_db::repositories::{ResidentRepo, UserRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// The caller's account with its server-side role.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    /// Resident record linked to this credential, if any.
    #[serde(rename = "moradorId")]
    pub resident_id: Option<DbId>,
}

/// GET /api/v1/users/me
pub async fn me(auth: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    let resident_id = ResidentRepo::find_by_user_id(&state.pool, user.id)
        .await?
        .map(|r| r.id);

    Ok(Json(DataResponse {
        data: MeResponse {
            user: UserResponse::from(&user),
            resident_id,
        },
    }))
}
