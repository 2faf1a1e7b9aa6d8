//! Recurring weekly workshop schedule computation.
//!
//! # Responsibility
//! - Compute an event's local date span from a start offset and week count.
//! - Generate one workshop occurrence per week inside that span.
//! - Convert local midnights to UTC instants in an explicitly supplied zone.
//!
//! # Invariants
//! - Computation is pure: no storage access, no global timezone.
//! - The occurrence count must equal the requested week count, otherwise the
//!   plan is rejected with a fatal error instead of a panic.

pub mod plan;
pub mod timezone;

pub use plan::{
    finish_date_for, plan_event_schedule, weekly_occurrences, EventPlan, EventRequest,
    ScheduleError,
};
pub use timezone::{local_to_utc, today_in, utc_to_local, NonexistentLocalTime};
