//! Handlers for common-area reservations.
//!
//! Booking runs in three stages: shape validation of the request (400),
//! existence of the referenced area and resident (404), and the overlap check
//! under the per-(area, date) lock inside
//! [`ReservationRepo::create_checked`] (409).

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use condo_core::error::CoreError;
use condo_db::models::reservation::{CreateReservation, ReservationDetail};
use condo_db::repositories::ReservationRepo;
use condo_events::{event_types, CondoEvent};

use super::today;
use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/reservas
///
/// All reservations ordered by date and start time, each with its derived
/// `scheduled`/`completed` status.
pub async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let today = today();
    let reservations: Vec<ReservationDetail> = ReservationRepo::list_detailed(&state.pool)
        .await?
        .into_iter()
        .map(|row| row.into_detail(today))
        .collect();
    Ok(Json(DataResponse { data: reservations }))
}

/// POST /api/v1/reservas
pub async fn create(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateReservation>,
) -> AppResult<impl IntoResponse> {
    let booking = input.parse()?;

    let reservation = ReservationRepo::create_checked(&state.pool, &booking).await?;

    let detail = ReservationRepo::find_detailed(&state.pool, reservation.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Reservation",
            id: reservation.id,
        }))?
        .into_detail(today());

    tracing::info!(
        reservation_id = reservation.id,
        common_area_id = reservation.common_area_id,
        date = %reservation.date,
        window = %booking.window,
        user_id = user.user_id,
        "Reservation created",
    );
    state.event_bus.publish(
        CondoEvent::new(event_types::RESERVATION_CREATED)
            .with_entity("reservation", reservation.id)
            .with_actor(user.user_id)
            .with_payload(serde_json::json!({
                "common_area_id": reservation.common_area_id,
                "resident_id": reservation.resident_id,
                "date": reservation.date,
                "window": booking.window.to_string(),
            })),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: detail })))
}
