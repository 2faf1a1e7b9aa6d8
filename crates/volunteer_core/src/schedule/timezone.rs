//! Local wall-clock to UTC conversion for a named zone.
//!
//! # Invariants
//! - Ambiguous local times (clocks falling back) resolve to the later,
//!   standard-time occurrence.
//! - Nonexistent local times (clocks springing forward) are rejected.

use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Local wall-clock value skipped by a daylight-saving transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("local time {local} does not exist in zone {zone}")]
pub struct NonexistentLocalTime {
    pub local: NaiveDateTime,
    pub zone: Tz,
}

/// Converts a naive local datetime in `zone` to a UTC instant.
pub fn local_to_utc(local: NaiveDateTime, zone: Tz) -> Result<DateTime<Utc>, NonexistentLocalTime> {
    match zone.from_local_datetime(&local) {
        LocalResult::Single(value) => Ok(value.with_timezone(&Utc)),
        LocalResult::Ambiguous(_, later) => Ok(later.with_timezone(&Utc)),
        LocalResult::None => Err(NonexistentLocalTime { local, zone }),
    }
}

/// Converts a UTC instant back to a naive wall-clock value in `zone`.
pub fn utc_to_local(instant: DateTime<Utc>, zone: Tz) -> NaiveDateTime {
    instant.with_timezone(&zone).naive_local()
}

/// Current local calendar date in `zone`.
pub fn today_in(zone: Tz) -> NaiveDate {
    Utc::now().with_timezone(&zone).date_naive()
}
