//! Bulk email to residents.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use condo_core::broadcast::{recipient_set, validate_message};
use condo_db::repositories::ResidentRepo;
use condo_events::{event_types, CondoEvent};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::extract::JsonBody;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /mail/broadcast`.
#[derive(Debug, Deserialize)]
pub struct BroadcastRequest {
    #[serde(rename = "assunto")]
    pub subject: String,
    #[serde(rename = "mensagem")]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct BroadcastAccepted {
    /// Number of distinct addresses the message was queued for.
    pub recipients: usize,
}

/// POST /api/v1/mail/broadcast
///
/// Queues the message for every active resident and returns 202 at once.
/// Delivery runs on a detached task; its failures are only logged.
pub async fn broadcast(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<BroadcastRequest>,
) -> AppResult<impl IntoResponse> {
    validate_message(&input.subject, &input.message)?;

    let recipients = recipient_set(ResidentRepo::active_emails(&state.pool).await?);
    let count = recipients.len();

    // The handle is dropped; the send outlives this request.
    let _ = state.mailer.dispatch(
        recipients,
        input.subject.trim().to_string(),
        input.message.clone(),
    );

    tracing::info!(recipients = count, admin_id = admin.user_id, "Broadcast queued");
    state.event_bus.publish(
        CondoEvent::new(event_types::MAIL_BROADCAST)
            .with_actor(admin.user_id)
            .with_payload(serde_json::json!({
                "subject": input.subject.trim(),
                "recipients": count,
            })),
    );

    Ok((
        StatusCode::ACCEPTED,
        Json(DataResponse {
            data: BroadcastAccepted { recipients: count },
        }),
    ))
}
