//! Event records.
//!
//! # Invariants
//! - `start_date` and `finish_date` are UTC instants of local midnights.
//! - Scheduler-created events satisfy `start_date < finish_date`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persistence-assigned event identity.
pub type EventId = i64;

/// Insert shape for an event, before storage assigns an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEvent {
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub finish_date: DateTime<Utc>,
    pub description: String,
    pub prerequisite: String,
    pub period: String,
}

/// A stored event spanning one or more weekly workshops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub finish_date: DateTime<Utc>,
    pub description: String,
    pub prerequisite: String,
    pub period: String,
}

impl Event {
    /// Attaches a storage id to an insert shape.
    pub fn from_new(id: EventId, new_event: NewEvent) -> Self {
        let NewEvent {
            name,
            start_date,
            finish_date,
            description,
            prerequisite,
            period,
        } = new_event;
        Self {
            id,
            name,
            start_date,
            finish_date,
            description,
            prerequisite,
            period,
        }
    }

    /// Returns whether the stored span is non-empty.
    pub fn has_valid_span(&self) -> bool {
        self.start_date < self.finish_date
    }
}

#[cfg(test)]
mod tests {
    use super::{Event, NewEvent};
    use chrono::{TimeZone, Utc};

    fn sample() -> NewEvent {
        NewEvent {
            name: "Intro to Programming".to_string(),
            start_date: Utc.with_ymd_and_hms(2026, 3, 1, 13, 0, 0).unwrap(),
            finish_date: Utc.with_ymd_and_hms(2026, 4, 6, 14, 0, 0).unwrap(),
            description: "Python from scratch".to_string(),
            prerequisite: "None".to_string(),
            period: "2 hours?".to_string(),
        }
    }

    #[test]
    fn from_new_keeps_every_field() {
        let event = Event::from_new(7, sample());
        assert_eq!(event.id, 7);
        assert_eq!(event.name, "Intro to Programming");
        assert_eq!(event.period, "2 hours?");
        assert!(event.has_valid_span());
    }

    #[test]
    fn serializes_instants_as_rfc3339() {
        let event = Event::from_new(1, sample());
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["start_date"], "2026-03-01T13:00:00Z");
        assert_eq!(json["id"], 1);
    }
}
