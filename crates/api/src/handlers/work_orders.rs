//! Handlers for maintenance work orders.
//!
//! Any authenticated user can open an order and read the list. Status changes
//! are admin-only and must follow the lifecycle in
//! `condo_core::work_order`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use condo_core::error::CoreError;
use condo_core::types::DbId;
use condo_core::validation::require_non_empty;
use condo_core::work_order::WorkOrderStatus;
use condo_db::models::work_order::{CreateWorkOrder, UpdateWorkOrderStatus, WorkOrderDetail};
use condo_db::repositories::{ProviderRepo, WorkOrderRepo};
use condo_events::{event_types, CondoEvent};

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, ValidatedJson};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /ordens-servico
// ---------------------------------------------------------------------------

/// All work orders with their provider, newest first.
pub async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let orders: Vec<WorkOrderDetail> = WorkOrderRepo::list_detailed(&state.pool)
        .await?
        .into_iter()
        .map(WorkOrderDetail::from)
        .collect();
    Ok(Json(DataResponse { data: orders }))
}

// ---------------------------------------------------------------------------
// POST /ordens-servico
// ---------------------------------------------------------------------------

/// Open a work order. The stored status is always `open`.
pub async fn create(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateWorkOrder>,
) -> AppResult<impl IntoResponse> {
    let title = require_non_empty("titulo", &input.title)?;
    let location = require_non_empty("local", &input.location)?;
    let priority = input.priority.unwrap_or_default();

    if ProviderRepo::find_by_id(&state.pool, input.provider_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Provider {} does not exist",
            input.provider_id
        ))));
    }

    let order =
        WorkOrderRepo::create(&state.pool, title, location, priority, input.provider_id).await?;
    let detail = find_detail(&state, order.id).await?;

    tracing::info!(
        work_order_id = order.id,
        provider_id = order.provider_id,
        priority = %priority,
        user_id = user.user_id,
        "Work order opened",
    );
    state.event_bus.publish(
        CondoEvent::new(event_types::WORK_ORDER_CREATED)
            .with_entity("work_order", order.id)
            .with_actor(user.user_id)
            .with_payload(serde_json::json!({
                "title": order.title,
                "priority": order.priority,
                "provider_id": order.provider_id,
            })),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: detail })))
}

// ---------------------------------------------------------------------------
// PATCH /ordens-servico/{id}/status
// ---------------------------------------------------------------------------

/// Move a work order along its lifecycle. Admin only.
pub async fn update_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    JsonBody(input): JsonBody<UpdateWorkOrderStatus>,
) -> AppResult<impl IntoResponse> {
    let next: WorkOrderStatus = input.status.parse()?;

    let (from, _) = WorkOrderRepo::set_status(&state.pool, id, next, admin.user_id).await?;
    let detail = find_detail(&state, id).await?;

    tracing::info!(
        work_order_id = id,
        from = %from,
        to = %next,
        user_id = admin.user_id,
        "Work order status updated",
    );
    state.event_bus.publish(
        CondoEvent::new(event_types::WORK_ORDER_STATUS_CHANGED)
            .with_entity("work_order", id)
            .with_actor(admin.user_id)
            .with_payload(serde_json::json!({ "from": from, "to": next })),
    );

    Ok(Json(DataResponse { data: detail }))
}

// ---------------------------------------------------------------------------
// GET /ordens-servico/{id}/historico
// ---------------------------------------------------------------------------

/// Status change history, oldest first.
pub async fn history(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if WorkOrderRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "WorkOrder",
            id,
        }));
    }
    let changes = WorkOrderRepo::history(&state.pool, id).await?;
    Ok(Json(DataResponse { data: changes }))
}

async fn find_detail(state: &AppState, id: DbId) -> AppResult<WorkOrderDetail> {
    WorkOrderRepo::find_detailed(&state.pool, id)
        .await?
        .map(WorkOrderDetail::from)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "WorkOrder",
            id,
        }))
}
