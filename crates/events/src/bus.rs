//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the publish/subscribe hub for [`CondoEvent`]s. It is
//! shared via `Arc<EventBus>` in the application state.

use chrono::{DateTime, Utc};
use condo_core::types::DbId;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Dot-separated event names written to `activity_log.event_type`.
pub mod event_types {
    pub const RESERVATION_CREATED: &str = "reservation.created";
    pub const WORK_ORDER_CREATED: &str = "work_order.created";
    pub const WORK_ORDER_STATUS_CHANGED: &str = "work_order.status_changed";
    pub const VISITOR_ENTERED: &str = "visitor.entered";
    pub const VISITOR_DEPARTED: &str = "visitor.departed";
    pub const ANNOUNCEMENT_CREATED: &str = "announcement.created";
    pub const ANNOUNCEMENT_DELETED: &str = "announcement.deleted";
    pub const UNIT_CREATED: &str = "unit.created";
    pub const UNIT_DELETED: &str = "unit.deleted";
    pub const RESIDENT_CREATED: &str = "resident.created";
    pub const RESIDENT_DELETED: &str = "resident.deleted";
    pub const PROVIDER_CREATED: &str = "provider.created";
    pub const PROVIDER_DELETED: &str = "provider.deleted";
    pub const COMMON_AREA_CREATED: &str = "common_area.created";
    pub const MAIL_BROADCAST: &str = "mail.broadcast";
    pub const USER_LOGGED_IN: &str = "user.logged_in";
}

// ---------------------------------------------------------------------------
// CondoEvent
// ---------------------------------------------------------------------------

/// Something that happened in the condominium, as recorded in the activity
/// log.
///
/// Constructed via [`CondoEvent::new`] and enriched with
/// [`with_entity`](CondoEvent::with_entity),
/// [`with_actor`](CondoEvent::with_actor) and
/// [`with_payload`](CondoEvent::with_payload).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CondoEvent {
    /// One of the [`event_types`] names.
    pub event_type: String,

    /// Kind of the affected record (e.g. `"reservation"`).
    pub entity_type: Option<String>,

    pub entity_id: Option<DbId>,

    /// User that triggered the event.
    pub actor_user_id: Option<DbId>,

    /// Event-specific details.
    pub payload: serde_json::Value,

    pub timestamp: DateTime<Utc>,
}

impl CondoEvent {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            entity_type: None,
            entity_id: None,
            actor_user_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    pub fn with_entity(mut self, entity_type: impl Into<String>, entity_id: DbId) -> Self {
        self.entity_type = Some(entity_type.into());
        self.entity_id = Some(entity_id);
        self
    }

    pub fn with_actor(mut self, user_id: DbId) -> Self {
        self.actor_user_id = Some(user_id);
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// ```rust
/// use condo_events::bus::{event_types, CondoEvent, EventBus};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(CondoEvent::new(event_types::VISITOR_ENTERED));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<CondoEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest un-consumed messages are dropped
    /// and slow receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// With no subscribers the event is dropped.
    pub fn publish(&self, event: CondoEvent) {
        // A SendError only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CondoEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
