//! Handlers for the visitor log.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use condo_core::error::CoreError;
use condo_core::types::DbId;
use condo_core::validation::require_non_empty;
use condo_db::models::visitor::{CreateVisitor, VisitorDetail};
use condo_db::repositories::{UnitRepo, VisitorRepo};
use condo_events::{event_types, CondoEvent};

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/visitantes
pub async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let visitors: Vec<VisitorDetail> = VisitorRepo::list_detailed(&state.pool)
        .await?
        .into_iter()
        .map(VisitorDetail::from)
        .collect();
    Ok(Json(DataResponse { data: visitors }))
}

/// POST /api/v1/visitantes
pub async fn create(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateVisitor>,
) -> AppResult<impl IntoResponse> {
    let name = require_non_empty("nome", &input.name)?;
    if UnitRepo::find_by_id(&state.pool, input.unit_id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Unit",
            id: input.unit_id,
        }));
    }

    let visitor = VisitorRepo::create(&state.pool, name, input.unit_id).await?;
    let detail = find_detail(&state, visitor.id).await?;

    state.event_bus.publish(
        CondoEvent::new(event_types::VISITOR_ENTERED)
            .with_entity("visitor", visitor.id)
            .with_actor(user.user_id)
            .with_payload(serde_json::json!({ "name": visitor.name, "unit_id": visitor.unit_id })),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: detail })))
}

/// PATCH /api/v1/visitantes/{id}/saida
///
/// Record a departure. A second departure is an invalid transition (409).
pub async fn depart(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let visitor = VisitorRepo::depart(&state.pool, id).await?;
    let detail = find_detail(&state, visitor.id).await?;

    state.event_bus.publish(
        CondoEvent::new(event_types::VISITOR_DEPARTED)
            .with_entity("visitor", visitor.id)
            .with_actor(user.user_id),
    );

    Ok(Json(DataResponse { data: detail }))
}

async fn find_detail(state: &AppState, id: DbId) -> AppResult<VisitorDetail> {
    VisitorRepo::find_detailed(&state.pool, id)
        .await?
        .map(VisitorDetail::from)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Visitor",
            id,
        }))
}
