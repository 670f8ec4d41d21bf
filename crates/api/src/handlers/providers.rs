//! Handlers for service providers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use condo_core::error::CoreError;
use condo_core::types::DbId;
use condo_core::validation::{normalize_phone, normalize_provider_document, require_non_empty};
use condo_db::models::provider::CreateProvider;
use condo_db::repositories::ProviderRepo;
use condo_events::{event_types, CondoEvent};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/prestadores
pub async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let providers = ProviderRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: providers }))
}

/// POST /api/v1/prestadores
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateProvider>,
) -> AppResult<impl IntoResponse> {
    // Validated after normalization so a blank optional email is accepted.
    let input = normalize(input)?;
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;
    let provider = ProviderRepo::create(&state.pool, &input).await?;

    state.event_bus.publish(
        CondoEvent::new(event_types::PROVIDER_CREATED)
            .with_entity("provider", provider.id)
            .with_actor(admin.user_id)
            .with_payload(serde_json::json!({ "name": provider.name })),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: provider })))
}

/// DELETE /api/v1/prestadores/{id}
///
/// 409 while work orders reference the provider.
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ProviderRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Provider",
            id,
        }));
    }

    state.event_bus.publish(
        CondoEvent::new(event_types::PROVIDER_DELETED)
            .with_entity("provider", id)
            .with_actor(admin.user_id),
    );

    Ok(StatusCode::NO_CONTENT)
}

/// Reduce document and phone to digits; blank optional fields become `None`.
fn normalize(input: CreateProvider) -> AppResult<CreateProvider> {
    let blank_to_none = |v: Option<String>| {
        v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
    };

    Ok(CreateProvider {
        name: require_non_empty("nome", &input.name)?.to_string(),
        document: normalize_provider_document(&input.document)?,
        specialty: require_non_empty("especialidade", &input.specialty)?.to_string(),
        company: blank_to_none(input.company),
        phone: normalize_phone(&input.phone)?,
        email: blank_to_none(input.email),
    })
}
