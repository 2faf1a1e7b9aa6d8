//! Demo dataset seeding.
//!
//! # Responsibility
//! - Optionally wipe events/workshops, then create three demo events.
//!
//! # Invariants
//! - Cleanup and all three events run in a single transaction: either the
//!   whole demo dataset lands or nothing changes.

use crate::model::event::Event;
use crate::repo::event_repo::{DeletedCounts, EventRepository, SqliteEventRepository};
use crate::schedule::EventRequest;
use crate::service::event_service::{create_in_scope, EventService, ServiceResult};
use chrono::{NaiveDate, NaiveTime, TimeDelta};
use log::info;
use rusqlite::TransactionBehavior;

/// Outcome of a seeding run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedReport {
    /// Present when cleanup ran before seeding.
    pub deleted: Option<DeletedCounts>,
    /// Created events in creation order.
    pub events: Vec<Event>,
}

/// The fixed demo events, relative to "today".
pub fn demo_event_requests() -> Vec<EventRequest> {
    vec![
        EventRequest {
            name: "Test: single-workshop event".to_string(),
            days_from_now: 10,
            week_count: 1,
            workshop_time: at_hour(10),
            description: "Learn how to <something> in 3 hours!".to_string(),
            prerequisite: "No prior programming experience required".to_string(),
            period: "3 hours?".to_string(),
            location: "UNSW K17 chi lab".to_string(),
        },
        EventRequest {
            name: "Intro to Programming".to_string(),
            days_from_now: 15,
            week_count: 6,
            workshop_time: at_hour(16),
            description: "Have you ever wanted to learn to write computer programs? \
                Jump in with the modern programming language Python and \
                learn to develop fun and exciting software from scratch."
                .to_string(),
            prerequisite: "No programming experience required".to_string(),
            period: "2 hours?".to_string(),
            location: "UNSW K17 oud lab".to_string(),
        },
        EventRequest {
            name: "Test: Advanced Web Development".to_string(),
            days_from_now: 28,
            week_count: 7,
            workshop_time: at_hour(16),
            description: "Learn how to make full-scale web apps with Django".to_string(),
            prerequisite: "Experience in web design (HTML,CSS,JavaScript) and coding in Python"
                .to_string(),
            period: "2 hours".to_string(),
            location: "UNSW K17 lyre lab".to_string(),
        },
    ]
}

fn at_hour(hour: i64) -> NaiveTime {
    NaiveTime::MIN + TimeDelta::hours(hour)
}

impl EventService<'_> {
    /// Seeds the demo dataset relative to today in the configured zone.
    pub fn seed_demo_data(&mut self, clean: bool) -> ServiceResult<SeedReport> {
        let today = self.config().today();
        self.seed_demo_data_on(today, clean)
    }

    /// Seeds the demo dataset relative to an explicit "today".
    pub fn seed_demo_data_on(
        &mut self,
        today: NaiveDate,
        clean: bool,
    ) -> ServiceResult<SeedReport> {
        let config = self.config();
        let tx = self
            .connection_mut()
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let deleted = if clean {
            Some(SqliteEventRepository::new(&tx).delete_all()?)
        } else {
            None
        };

        let events = demo_event_requests()
            .iter()
            .map(|request| create_in_scope(&tx, config, today, request))
            .collect::<ServiceResult<Vec<_>>>()?;

        tx.commit()?;
        info!(
            "event=seed_demo module=service status=ok clean={} events={}",
            clean,
            events.len()
        );
        Ok(SeedReport { deleted, events })
    }
}
