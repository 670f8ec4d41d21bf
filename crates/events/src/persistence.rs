//! Activity log persistence service.
//!
//! [`ActivityPersistence`] subscribes to the [`EventBus`](crate::bus::EventBus)
//! and writes every received [`CondoEvent`] to `activity_log`. It runs as a
//! long-lived background task and exits once the bus is dropped.

use condo_core::types::DbId;
use condo_db::models::activity::CreateActivityEvent;
use condo_db::repositories::ActivityRepo;
use condo_db::DbPool;
use tokio::sync::broadcast;

use crate::bus::CondoEvent;

pub struct ActivityPersistence;

impl ActivityPersistence {
    /// Run the persistence loop until the channel closes.
    pub async fn run(pool: DbPool, mut receiver: broadcast::Receiver<CondoEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(e) = Self::persist(&pool, &event).await {
                        tracing::error!(
                            error = %e,
                            event_type = %event.event_type,
                            "Failed to persist activity event"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(
                        skipped = n,
                        "Activity persistence lagged, some events were not recorded"
                    );
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, activity persistence shutting down");
                    break;
                }
            }
        }
    }

    async fn persist(pool: &DbPool, event: &CondoEvent) -> Result<DbId, sqlx::Error> {
        ActivityRepo::insert(pool, &to_activity(event)).await
    }
}

fn to_activity(event: &CondoEvent) -> CreateActivityEvent {
    CreateActivityEvent {
        event_type: event.event_type.clone(),
        entity_type: event.entity_type.clone(),
        entity_id: event.entity_id,
        actor_user_id: event.actor_user_id,
        payload: event.payload.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::event_types;

    #[test]
    fn event_maps_onto_activity_row() {
        let event = CondoEvent::new(event_types::WORK_ORDER_STATUS_CHANGED)
            .with_entity("work_order", 3)
            .with_actor(1)
            .with_payload(serde_json::json!({"from": "open", "to": "in_progress"}));

        let row = to_activity(&event);
        assert_eq!(row.event_type, "work_order.status_changed");
        assert_eq!(row.entity_type.as_deref(), Some("work_order"));
        assert_eq!(row.entity_id, Some(3));
        assert_eq!(row.actor_user_id, Some(1));
        assert_eq!(row.payload["to"], "in_progress");
    }
}
