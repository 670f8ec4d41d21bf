//! Handlers for residents.
//!
//! Registering a resident also creates the login credential used by the
//! resident portal; both rows are written in one transaction.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use condo_core::error::CoreError;
use condo_core::types::DbId;
use condo_core::validation::{normalize_cpf, normalize_phone, require_non_empty};
use condo_db::models::resident::{CreateResident, NewResident, ResidentDetail};
use condo_db::repositories::{ResidentRepo, UnitRepo};
use condo_events::{event_types, CondoEvent};

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/moradores
pub async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let residents: Vec<ResidentDetail> = ResidentRepo::list_detailed(&state.pool)
        .await?
        .into_iter()
        .map(ResidentDetail::from)
        .collect();
    Ok(Json(DataResponse { data: residents }))
}

/// POST /api/v1/moradores
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateResident>,
) -> AppResult<impl IntoResponse> {
    let new = normalize(&input)?;

    if UnitRepo::find_by_id(&state.pool, new.unit_id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Unit",
            id: new.unit_id,
        }));
    }

    let resident = ResidentRepo::create_with_user(&state.pool, &new).await?;
    let detail = ResidentRepo::find_detailed(&state.pool, resident.id)
        .await?
        .map(ResidentDetail::from)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Resident",
            id: resident.id,
        }))?;

    tracing::info!(
        resident_id = resident.id,
        unit_id = resident.unit_id,
        admin_id = admin.user_id,
        "Resident registered",
    );
    state.event_bus.publish(
        CondoEvent::new(event_types::RESIDENT_CREATED)
            .with_entity("resident", resident.id)
            .with_actor(admin.user_id)
            .with_payload(serde_json::json!({ "unit_id": resident.unit_id })),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: detail })))
}

/// DELETE /api/v1/moradores/{id}
///
/// 409 while reservations reference the resident.
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ResidentRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Resident",
            id,
        }));
    }

    state.event_bus.publish(
        CondoEvent::new(event_types::RESIDENT_DELETED)
            .with_entity("resident", id)
            .with_actor(admin.user_id),
    );

    Ok(StatusCode::NO_CONTENT)
}

/// Normalize documents, hash the password and trim names.
fn normalize(input: &CreateResident) -> AppResult<NewResident> {
    let name = require_non_empty("nome", &input.name)?.to_string();
    let surname = require_non_empty("sobrenome", &input.surname)?.to_string();
    let document_id = normalize_cpf(&input.cpf)?;
    let phone = normalize_phone(&input.phone)?;

    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    Ok(NewResident {
        name,
        surname,
        document_id,
        phone,
        unit_id: input.unit_id,
        email: input.email.trim().to_lowercase(),
        password_hash,
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn input(cpf: &str, phone: &str, password: &str) -> CreateResident {
        CreateResident {
            name: " Ana ".into(),
            surname: "Souza".into(),
            cpf: cpf.into(),
            phone: phone.into(),
            unit_id: 1,
            email: " Ana@Example.com ".into(),
            password: password.into(),
        }
    }

    #[test]
    fn normalize_strips_formatting_and_hashes_password() {
        let new = normalize(&input("123.456.789-09", "(11) 98765-4321", "segredo123")).unwrap();
        assert_eq!(new.name, "Ana");
        assert_eq!(new.document_id, "12345678909");
        assert_eq!(new.phone, "11987654321");
        assert_eq!(new.email, "ana@example.com");
        assert!(new.password_hash.starts_with("$argon2id$"));
    }

    #[test]
    fn normalize_rejects_short_cpf_and_weak_password() {
        assert_matches!(
            normalize(&input("123", "11987654321", "segredo123")),
            Err(AppError::Core(CoreError::Validation(_)))
        );
        assert_matches!(
            normalize(&input("12345678909", "11987654321", "curta")),
            Err(AppError::Core(CoreError::Validation(_)))
        );
    }
}
