//! Common-area reservation rules.
//!
//! Bookings are half-open wall-clock windows `[start, end)` on a single
//! calendar date. Two windows on the same area and date conflict when they
//! intersect; windows that only touch at a boundary do not, so back-to-back
//! bookings are allowed.
//!
//! This module lives in `core` so the overlap rule has one definition shared
//! by the repository layer (which enforces it under a lock) and the tests.

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;

/// Accepted wall-clock input formats, tried in order.
const WALL_CLOCK_FORMATS: &[&str] = &["%H:%M", "%H:%M:%S"];

// ---------------------------------------------------------------------------
// TimeWindow
// ---------------------------------------------------------------------------

/// A validated half-open time window. `start < end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeWindow {
    /// Build a window, rejecting empty and inverted ranges.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, CoreError> {
        if start >= end {
            return Err(CoreError::Validation(format!(
                "End time ({}) must be later than start time ({})",
                format_wall_clock(end),
                format_wall_clock(start),
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Half-open intersection test. Touching boundaries do not overlap.
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            format_wall_clock(self.start),
            format_wall_clock(self.end)
        )
    }
}

/// Parse a wall-clock time given as `HH:MM` or `HH:MM:SS`.
pub fn parse_wall_clock(field: &str, value: &str) -> Result<NaiveTime, CoreError> {
    let value = value.trim();
    WALL_CLOCK_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(value, fmt).ok())
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "{field} must be a time in HH:MM format (got '{value}')"
            ))
        })
}

/// Render a wall-clock time as `HH:MM`, or `HH:MM:SS` when it carries seconds.
pub fn format_wall_clock(time: NaiveTime) -> String {
    if time.second() == 0 {
        time.format("%H:%M").to_string()
    } else {
        time.format("%H:%M:%S").to_string()
    }
}

/// Parse a calendar date given as `YYYY-MM-DD`.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, CoreError> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        CoreError::Validation(format!(
            "{field} must be a date in YYYY-MM-DD format (got '{value}')"
        ))
    })
}

// ---------------------------------------------------------------------------
// Conflict detection
// ---------------------------------------------------------------------------

/// Reject `candidate` if it intersects any of the windows already booked for
/// the same area on `date`.
///
/// `booked` carries the existing reservation id alongside its window so the
/// error can point at the conflicting booking.
pub fn ensure_available<I>(date: NaiveDate, candidate: &TimeWindow, booked: I) -> Result<(), CoreError>
where
    I: IntoIterator<Item = (DbId, TimeWindow)>,
{
    match booked.into_iter().find(|(_, w)| w.overlaps(candidate)) {
        Some((id, existing)) => Err(CoreError::Conflict(format!(
            "Time slot unavailable: the area is already booked {existing} on {date} \
             (reservation {id})"
        ))),
        None => Ok(()),
    }
}

/// Advisory-lock key for a (common area, date) pair.
///
/// Distinct pairs may share a key; that only serializes unrelated bookings,
/// it never lets overlapping ones through.
pub fn lock_key(common_area_id: DbId, date: NaiveDate) -> i64 {
    common_area_id.wrapping_shl(24) ^ i64::from(date.num_days_from_ce())
}

// ---------------------------------------------------------------------------
// Derived status
// ---------------------------------------------------------------------------

/// Display status of a reservation, computed at read time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Scheduled,
    Completed,
}

impl ReservationStatus {
    /// `Scheduled` when the reservation date is today or later.
    pub fn derive(date: NaiveDate, today: NaiveDate) -> Self {
        if date >= today {
            Self::Scheduled
        } else {
            Self::Completed
        }
    }
}

// ---------------------------------------------------------------------------
// Serde helpers
// ---------------------------------------------------------------------------

/// `serde(with)` module rendering [`NaiveTime`] through [`format_wall_clock`]
/// and accepting `HH:MM` or `HH:MM:SS` on input.
pub mod wall_clock {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_wall_clock(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_wall_clock("time", &raw).map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn t(s: &str) -> NaiveTime {
        parse_wall_clock("t", s).unwrap()
    }

    fn w(start: &str, end: &str) -> TimeWindow {
        TimeWindow::new(t(start), t(end)).unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    #[test]
    fn equal_start_and_end_is_rejected() {
        assert_matches!(
            TimeWindow::new(t("10:00"), t("10:00")),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn inverted_window_is_rejected() {
        assert_matches!(
            TimeWindow::new(t("14:00"), t("10:00")),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn back_to_back_windows_do_not_overlap() {
        assert!(!w("10:00", "12:00").overlaps(&w("12:00", "14:00")));
        assert!(!w("12:00", "14:00").overlaps(&w("10:00", "12:00")));
    }

    #[test]
    fn partial_and_nested_windows_overlap() {
        let base = w("10:00", "12:00");
        assert!(base.overlaps(&w("11:00", "13:00")));
        assert!(base.overlaps(&w("09:00", "10:30")));
        assert!(base.overlaps(&w("10:30", "11:00")));
        assert!(base.overlaps(&w("08:00", "18:00")));
        assert!(base.overlaps(&base));
    }

    #[test]
    fn ensure_available_reports_the_conflicting_booking() {
        let booked = vec![(1, w("08:00", "09:00")), (7, w("10:00", "12:00"))];
        let err = ensure_available(day(), &w("11:00", "13:00"), booked).unwrap_err();
        assert_matches!(err, CoreError::Conflict(msg) if msg.contains("10:00-12:00") && msg.contains("reservation 7"));
    }

    #[test]
    fn ensure_available_accepts_free_slot() {
        let booked = vec![(1, w("08:00", "10:00")), (2, w("12:00", "14:00"))];
        assert!(ensure_available(day(), &w("10:00", "12:00"), booked).is_ok());
    }

    #[test]
    fn wall_clock_accepts_seconds_and_rejects_garbage() {
        assert_eq!(t("07:30:00"), t("07:30"));
        assert_matches!(parse_wall_clock("horaInicio", "25:00"), Err(CoreError::Validation(_)));
        assert_matches!(parse_wall_clock("horaInicio", "noon"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn parse_date_requires_iso_format() {
        assert_eq!(parse_date("data", "2026-03-14").unwrap(), day());
        assert!(parse_date("data", "14/03/2026").is_err());
    }

    #[test]
    fn status_is_scheduled_today_and_later() {
        let today = day();
        assert_eq!(ReservationStatus::derive(today, today), ReservationStatus::Scheduled);
        assert_eq!(
            ReservationStatus::derive(today.succ_opt().unwrap(), today),
            ReservationStatus::Scheduled
        );
        assert_eq!(
            ReservationStatus::derive(today.pred_opt().unwrap(), today),
            ReservationStatus::Completed
        );
    }

    #[test]
    fn lock_key_differs_across_dates_for_same_area() {
        let next = day().succ_opt().unwrap();
        assert_ne!(lock_key(3, day()), lock_key(3, next));
        assert_eq!(lock_key(3, day()), lock_key(3, day()));
    }

    #[test]
    fn wall_clock_serde_round_trips_as_hh_mm() {
        #[derive(serde::Serialize, serde::Deserialize)]
        struct Slot {
            #[serde(with = "wall_clock")]
            at: NaiveTime,
        }
        let slot: Slot = serde_json::from_str(r#"{"at":"09:15:00"}"#).unwrap();
        assert_eq!(serde_json::to_string(&slot).unwrap(), r#"{"at":"09:15"}"#);
    }

    #[test]
    fn seconds_survive_display_and_serialization() {
        let window = w("10:00:30", "12:00");
        assert_eq!(window.to_string(), "10:00:30-12:00");

        #[derive(serde::Serialize)]
        struct Slot {
            #[serde(with = "wall_clock")]
            at: NaiveTime,
        }
        let json = serde_json::to_string(&Slot { at: t("10:00:30") }).unwrap();
        assert_eq!(json, r#"{"at":"10:00:30"}"#);
    }
}
