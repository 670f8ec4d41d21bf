//! Handlers for units (apartments).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use condo_core::error::CoreError;
use condo_core::types::DbId;
use condo_core::validation::require_non_empty;
use condo_db::models::unit::CreateUnit;
use condo_db::repositories::UnitRepo;
use condo_events::{event_types, CondoEvent};

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/unidades
pub async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let units = UnitRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: units }))
}

/// POST /api/v1/unidades
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateUnit>,
) -> AppResult<impl IntoResponse> {
    require_non_empty("bloco", &input.block)?;
    require_non_empty("apartamento", &input.number)?;

    let unit = UnitRepo::create(&state.pool, &input).await?;

    state.event_bus.publish(
        CondoEvent::new(event_types::UNIT_CREATED)
            .with_entity("unit", unit.id)
            .with_actor(admin.user_id)
            .with_payload(serde_json::json!({ "block": unit.block, "number": unit.number })),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: unit })))
}

/// DELETE /api/v1/unidades/{id}
///
/// 409 while residents or visitors reference the unit.
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !UnitRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "Unit", id }));
    }

    state.event_bus.publish(
        CondoEvent::new(event_types::UNIT_DELETED)
            .with_entity("unit", id)
            .with_actor(admin.user_id),
    );

    Ok(StatusCode::NO_CONTENT)
}
