//! Handlers for announcements (notice board).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use condo_core::error::CoreError;
use condo_core::types::DbId;
use condo_core::validation::require_non_empty;
use condo_db::models::announcement::CreateAnnouncement;
use condo_db::repositories::AnnouncementRepo;
use condo_events::{event_types, CondoEvent};

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/avisos
pub async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let announcements = AnnouncementRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: announcements }))
}

/// POST /api/v1/avisos
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateAnnouncement>,
) -> AppResult<impl IntoResponse> {
    let title = require_non_empty("titulo", &input.title)?;
    let description = require_non_empty("descricao", &input.description)?;

    let announcement =
        AnnouncementRepo::create(&state.pool, title, description, input.flag).await?;

    state.event_bus.publish(
        CondoEvent::new(event_types::ANNOUNCEMENT_CREATED)
            .with_entity("announcement", announcement.id)
            .with_actor(admin.user_id)
            .with_payload(serde_json::json!({
                "title": announcement.title,
                "flag": announcement.flag,
            })),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: announcement })))
}

/// DELETE /api/v1/avisos/{id}
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !AnnouncementRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Announcement",
            id,
        }));
    }

    state.event_bus.publish(
        CondoEvent::new(event_types::ANNOUNCEMENT_DELETED)
            .with_entity("announcement", id)
            .with_actor(admin.user_id),
    );

    Ok(StatusCode::NO_CONTENT)
}
