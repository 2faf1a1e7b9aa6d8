//! Event scheduling use-case service.
//!
//! # Responsibility
//! - Plan an event with weekly workshops and persist both atomically.
//! - Provide bulk cleanup and read-back helpers for callers.
//!
//! # Invariants
//! - The event insert and its workshop inserts share one `IMMEDIATE`
//!   transaction; any failure rolls both back.
//! - The event row is written before its workshops reference it.

use crate::config::SchedulerConfig;
use crate::model::event::{Event, EventId};
use crate::model::workshop::Workshop;
use crate::repo::event_repo::{DeletedCounts, EventRepository, SqliteEventRepository};
use crate::repo::RepoError;
use crate::schedule::{plan_event_schedule, EventRequest, ScheduleError};
use chrono::NaiveDate;
use log::{error, info};
use rusqlite::{Connection, TransactionBehavior};
use std::time::Instant;

pub type ServiceResult<T> = Result<T, EventServiceError>;

/// Errors from event scheduling use-cases.
#[derive(Debug, thiserror::Error)]
pub enum EventServiceError {
    #[error("schedule rejected: {0}")]
    Schedule(#[from] ScheduleError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl EventServiceError {
    /// Whether the failure is a caller logic error (see [`ScheduleError::is_fatal`]).
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Schedule(err) if err.is_fatal())
    }
}

impl From<rusqlite::Error> for EventServiceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Repo(value.into())
    }
}

/// Event service bound to one connection and one scheduler configuration.
pub struct EventService<'conn> {
    conn: &'conn mut Connection,
    config: SchedulerConfig,
}

impl<'conn> EventService<'conn> {
    pub fn new(conn: &'conn mut Connection, config: SchedulerConfig) -> Self {
        Self { conn, config }
    }

    pub fn config(&self) -> SchedulerConfig {
        self.config
    }

    /// Creates an event and its weekly workshops relative to today in the
    /// configured zone.
    pub fn create_event_with_workshops(&mut self, request: &EventRequest) -> ServiceResult<Event> {
        let today = self.config.today();
        self.create_event_with_workshops_on(today, request)
    }

    /// Same as [`Self::create_event_with_workshops`] with an explicit "today".
    ///
    /// # Errors
    /// - [`EventServiceError::Schedule`] when planning fails; nothing is written.
    /// - [`EventServiceError::Repo`] when a write fails; the transaction is
    ///   rolled back.
    pub fn create_event_with_workshops_on(
        &mut self,
        today: NaiveDate,
        request: &EventRequest,
    ) -> ServiceResult<Event> {
        let config = self.config;
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let event = create_in_scope(&tx, config, today, request)?;
        tx.commit()?;
        Ok(event)
    }

    /// Deletes all events and workshops in one transaction.
    pub fn clean(&mut self) -> ServiceResult<DeletedCounts> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let deleted = SqliteEventRepository::new(&tx).delete_all()?;
        tx.commit()?;
        info!(
            "event=events_clean module=service status=ok events={} workshops={}",
            deleted.events, deleted.workshops
        );
        Ok(deleted)
    }

    pub fn get_event(&self, id: EventId) -> ServiceResult<Option<Event>> {
        Ok(SqliteEventRepository::new(self.conn).get_event(id)?)
    }

    pub fn list_events(&self) -> ServiceResult<Vec<Event>> {
        Ok(SqliteEventRepository::new(self.conn).list_events()?)
    }

    pub fn list_workshops(&self, event_id: EventId) -> ServiceResult<Vec<Workshop>> {
        Ok(SqliteEventRepository::new(self.conn).list_workshops(event_id)?)
    }

    pub(crate) fn connection_mut(&mut self) -> &mut Connection {
        self.conn
    }
}

/// Plans and writes one event on `conn` without committing.
///
/// The caller owns the surrounding transaction.
pub(crate) fn create_in_scope(
    conn: &Connection,
    config: SchedulerConfig,
    today: NaiveDate,
    request: &EventRequest,
) -> ServiceResult<Event> {
    let started_at = Instant::now();
    let plan = plan_event_schedule(today, request, config.timezone).map_err(|err| {
        error!(
            "event=event_create module=service status=error stage=plan fatal={} error={}",
            err.is_fatal(),
            err
        );
        err
    })?;

    let repo = SqliteEventRepository::new(conn);
    let written = repo.insert_event(&plan.event).and_then(|event_id| {
        repo.insert_workshops(event_id, &plan.workshops)
            .map(|workshop_ids| (event_id, workshop_ids.len()))
    });
    let (event_id, workshop_count) = written.map_err(|err| {
        error!(
            "event=event_create module=service status=error stage=persist duration_ms={} error={}",
            started_at.elapsed().as_millis(),
            err
        );
        err
    })?;

    info!(
        "event=event_create module=service status=ok event_id={} workshops={} duration_ms={}",
        event_id,
        workshop_count,
        started_at.elapsed().as_millis()
    );
    Ok(Event::from_new(event_id, plan.event))
}
