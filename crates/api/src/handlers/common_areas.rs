//! Handlers for common areas (bookable spaces).

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use condo_core::validation::require_non_empty;
use condo_db::models::common_area::CreateCommonArea;
use condo_db::repositories::CommonAreaRepo;
use condo_events::{event_types, CondoEvent};

use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/areas-comuns
pub async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let areas = CommonAreaRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: areas }))
}

/// POST /api/v1/areas-comuns
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateCommonArea>,
) -> AppResult<impl IntoResponse> {
    require_non_empty("nome", &input.name)?;
    let area = CommonAreaRepo::create(&state.pool, &input).await?;

    state.event_bus.publish(
        CondoEvent::new(event_types::COMMON_AREA_CREATED)
            .with_entity("common_area", area.id)
            .with_actor(admin.user_id)
            .with_payload(serde_json::json!({ "name": area.name })),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: area })))
}
