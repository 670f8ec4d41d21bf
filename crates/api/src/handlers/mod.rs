//! HTTP handlers, one module per resource.

pub mod activity;
pub mod announcements;
pub mod auth;
pub mod common_areas;
pub mod dashboard;
pub mod mail;
pub mod providers;
pub mod reservations;
pub mod residents;
pub mod units;
pub mod users;
pub mod visitors;
pub mod work_orders;

use chrono::NaiveDate;

/// Calendar date in the server's local time zone. Reservation status and the
/// dashboard's "today" counter are relative to it.
pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
