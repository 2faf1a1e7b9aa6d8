//! Event span and weekly occurrence planning.
//!
//! # Responsibility
//! - Turn an [`EventRequest`] plus "today" into an [`EventPlan`] holding the
//!   event insert shape and one workshop insert shape per week.
//!
//! # Invariants
//! - Single-week events span exactly one day; longer events span
//!   `week_count * 7 - 6` days so the last week's workshop is contained.
//! - Occurrences are strictly increasing by seven days and lie in
//!   `[start_date@workshop_time, finish_date@00:00)`.
//! - Workshop end time is start time plus one hour on the clock face.

use crate::model::event::NewEvent;
use crate::model::workshop::{workshop_label, NewWorkshop};
use crate::schedule::timezone::{local_to_utc, NonexistentLocalTime};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use chrono_tz::Tz;
use log::{debug, warn};

/// Parameters for one generated event and its weekly workshops.
///
/// No field is validated: empty text, negative offsets and a zero week count
/// are all passed through to the computation as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRequest {
    pub name: String,
    /// Days between today and the event's first day.
    pub days_from_now: i64,
    /// Number of weekly workshop occurrences.
    pub week_count: u32,
    /// Local start time of every workshop.
    pub workshop_time: NaiveTime,
    pub description: String,
    pub prerequisite: String,
    pub period: String,
    /// Location shared by every workshop.
    pub location: String,
}

/// Errors raised while planning a schedule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    /// Caller logic error: the weekly loop disagreed with the span formula.
    #[error("generated {generated} weekly workshops but {expected} were requested")]
    InconsistentWeekCount { expected: u32, generated: usize },
    /// Event boundary falls into a daylight-saving gap.
    #[error(transparent)]
    NonexistentLocalTime(#[from] NonexistentLocalTime),
    /// Date arithmetic left chrono's representable range.
    #[error("schedule date out of range: {0}")]
    OutOfRange(&'static str),
}

impl ScheduleError {
    /// Whether the error signals a caller logic error rather than bad data.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InconsistentWeekCount { .. })
    }
}

/// Fully computed, not yet persisted, event schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventPlan {
    /// Local midnight of the first day.
    pub start_local: NaiveDateTime,
    /// Local midnight of the (exclusive) finish day.
    pub finish_local: NaiveDateTime,
    pub event: NewEvent,
    /// Weekly workshops in chronological order.
    pub workshops: Vec<NewWorkshop>,
}

impl EventPlan {
    /// Local start datetimes of every workshop, in order.
    pub fn occurrence_starts(&self) -> Vec<NaiveDateTime> {
        self.workshops
            .iter()
            .map(|workshop| workshop.date.and_time(workshop.start_time))
            .collect()
    }
}

/// Computes the exclusive finish date for an event starting on `start_date`.
pub fn finish_date_for(start_date: NaiveDate, week_count: u32) -> Result<NaiveDate, ScheduleError> {
    let span_days = if week_count == 1 {
        1
    } else {
        i64::from(week_count) * 7 - 6
    };
    shift_days(start_date, span_days, "finish date")
}

/// Collects weekly start datetimes from `start_date@workshop_time` while they
/// stay strictly before `finish_local`.
pub fn weekly_occurrences(
    start_date: NaiveDate,
    workshop_time: NaiveTime,
    finish_local: NaiveDateTime,
) -> Vec<NaiveDateTime> {
    let week = TimeDelta::days(7);
    let mut occurrences = Vec::new();
    let mut current = start_date.and_time(workshop_time);
    while current < finish_local {
        occurrences.push(current);
        current = match current.checked_add_signed(week) {
            Some(next) => next,
            None => break,
        };
    }
    occurrences
}

/// Plans an event and its weekly workshops relative to `today` in `zone`.
///
/// # Errors
/// - [`ScheduleError::InconsistentWeekCount`] when the generated occurrence
///   count differs from `request.week_count` (fatal, see
///   [`ScheduleError::is_fatal`]).
/// - [`ScheduleError::NonexistentLocalTime`] when a boundary midnight is
///   skipped by a daylight-saving transition in `zone`.
pub fn plan_event_schedule(
    today: NaiveDate,
    request: &EventRequest,
    zone: Tz,
) -> Result<EventPlan, ScheduleError> {
    let start_date = shift_days(today, request.days_from_now, "start date")?;
    let finish_date = finish_date_for(start_date, request.week_count)?;

    let start_local = start_date.and_time(NaiveTime::MIN);
    let finish_local = finish_date.and_time(NaiveTime::MIN);

    let occurrences = weekly_occurrences(start_date, request.workshop_time, finish_local);
    if occurrences.len() as u64 != u64::from(request.week_count) {
        return Err(ScheduleError::InconsistentWeekCount {
            expected: request.week_count,
            generated: occurrences.len(),
        });
    }

    let event = NewEvent {
        name: request.name.clone(),
        start_date: local_to_utc(start_local, zone)?,
        finish_date: local_to_utc(finish_local, zone)?,
        description: request.description.clone(),
        prerequisite: request.prerequisite.clone(),
        period: request.period.clone(),
    };

    let workshops = occurrences
        .iter()
        .enumerate()
        .map(|(index, start)| {
            let start_time = start.time();
            let (end_time, wrapped_secs) = start_time.overflowing_add_signed(TimeDelta::hours(1));
            if wrapped_secs != 0 {
                warn!(
                    "event=workshop_end_wraps module=schedule status=warn date={} start_time={} end_time={}",
                    start.date(),
                    start_time,
                    end_time
                );
            }
            NewWorkshop {
                name: workshop_label(index),
                date: start.date(),
                start_time,
                end_time,
                location: request.location.clone(),
            }
        })
        .collect::<Vec<_>>();

    debug!(
        "event=schedule_plan module=schedule status=ok zone={} start={} finish={} workshops={}",
        zone,
        start_date,
        finish_date,
        workshops.len()
    );

    Ok(EventPlan {
        start_local,
        finish_local,
        event,
        workshops,
    })
}

fn shift_days(date: NaiveDate, days: i64, what: &'static str) -> Result<NaiveDate, ScheduleError> {
    TimeDelta::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .ok_or(ScheduleError::OutOfRange(what))
}
