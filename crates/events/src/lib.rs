//! Condominium event bus, activity log persistence and outbound mail.
//!
//! - [`EventBus`] -- in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`CondoEvent`] -- the domain event envelope published by handlers.
//! - [`ActivityPersistence`] -- background service writing every event to
//!   the `activity_log` table.
//! - [`delivery`] -- the [`MailTransport`] seam with SMTP and logging
//!   implementations.
//! - [`BulkMailer`] -- fire-and-forget fan-out of one message to many
//!   recipients.

pub mod broadcast;
pub mod bus;
pub mod delivery;
pub mod persistence;

pub use broadcast::{BroadcastReport, BulkMailer};
pub use bus::{event_types, CondoEvent, EventBus};
pub use delivery::email::{EmailConfig, EmailError, LogTransport, MailTransport, SmtpTransport};
pub use persistence::ActivityPersistence;
