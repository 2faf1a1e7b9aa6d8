//! Workshop records.
//!
//! # Invariants
//! - `date`, `start_time` and `end_time` are local values in the scheduler zone.
//! - `end_time` is `start_time` plus one hour on the clock face.

use crate::model::event::EventId;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Persistence-assigned workshop identity.
pub type WorkshopId = i64;

/// Insert shape for a workshop; the owning event id is supplied at insert time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWorkshop {
    pub name: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location: String,
}

/// A stored workshop occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workshop {
    pub id: WorkshopId,
    pub event_id: EventId,
    pub name: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location: String,
}

/// Sequential display label for the occurrence at 0-based `index`.
pub fn workshop_label(index: usize) -> String {
    format!("Workshop #{}", index + 1)
}
