//! Event/workshop repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Insert events and their workshops, read them back, bulk-delete them.
//!
//! # Invariants
//! - UTC instants are stored as Unix epoch milliseconds.
//! - Workshop dates and times are stored as ISO text in local terms.
//! - Deleting an event cascades to its workshops.

use crate::model::event::{Event, EventId, NewEvent};
use crate::model::workshop::{NewWorkshop, Workshop, WorkshopId};
use crate::repo::{RepoError, RepoResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};

const EVENT_SELECT_SQL: &str = "SELECT
    id,
    name,
    start_date,
    finish_date,
    description,
    prerequisite,
    period
FROM events";

const WORKSHOP_SELECT_SQL: &str = "SELECT
    id,
    event_id,
    name,
    date,
    start_time,
    end_time,
    location
FROM workshops";

/// Rows removed by a bulk cleanup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeletedCounts {
    pub events: usize,
    pub workshops: usize,
}

/// Repository interface for events and their workshops.
pub trait EventRepository {
    /// Inserts one event and returns its assigned id.
    fn insert_event(&self, event: &NewEvent) -> RepoResult<EventId>;
    /// Inserts workshops owned by `event_id`, preserving input order.
    fn insert_workshops(
        &self,
        event_id: EventId,
        workshops: &[NewWorkshop],
    ) -> RepoResult<Vec<WorkshopId>>;
    fn get_event(&self, id: EventId) -> RepoResult<Option<Event>>;
    /// Lists events by `start_date ASC, id ASC`.
    fn list_events(&self) -> RepoResult<Vec<Event>>;
    /// Lists workshops of one event by `date, start_time, id`.
    fn list_workshops(&self, event_id: EventId) -> RepoResult<Vec<Workshop>>;
    /// Deletes every event and every workshop.
    fn delete_all(&self) -> RepoResult<DeletedCounts>;
}

/// SQLite-backed event repository.
///
/// Accepts any connection, including a [`rusqlite::Transaction`] through
/// deref, so writes join the caller's transaction.
pub struct SqliteEventRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEventRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl EventRepository for SqliteEventRepository<'_> {
    fn insert_event(&self, event: &NewEvent) -> RepoResult<EventId> {
        self.conn.execute(
            "INSERT INTO events (
                name,
                start_date,
                finish_date,
                description,
                prerequisite,
                period
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                event.name.as_str(),
                event.start_date.timestamp_millis(),
                event.finish_date.timestamp_millis(),
                event.description.as_str(),
                event.prerequisite.as_str(),
                event.period.as_str(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn insert_workshops(
        &self,
        event_id: EventId,
        workshops: &[NewWorkshop],
    ) -> RepoResult<Vec<WorkshopId>> {
        let mut stmt = self.conn.prepare(
            "INSERT INTO workshops (
                event_id,
                name,
                date,
                start_time,
                end_time,
                location
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
        )?;

        let mut ids = Vec::with_capacity(workshops.len());
        for workshop in workshops {
            let id = stmt.insert(params![
                event_id,
                workshop.name.as_str(),
                workshop.date,
                workshop.start_time,
                workshop.end_time,
                workshop.location.as_str(),
            ])?;
            ids.push(id);
        }
        Ok(ids)
    }

    fn get_event(&self, id: EventId) -> RepoResult<Option<Event>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EVENT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_event_row(row)?));
        }
        Ok(None)
    }

    fn list_events(&self) -> RepoResult<Vec<Event>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EVENT_SELECT_SQL} ORDER BY start_date ASC, id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut events = Vec::new();
        while let Some(row) = rows.next()? {
            events.push(parse_event_row(row)?);
        }
        Ok(events)
    }

    fn list_workshops(&self, event_id: EventId) -> RepoResult<Vec<Workshop>> {
        let mut stmt = self.conn.prepare(&format!(
            "{WORKSHOP_SELECT_SQL}
             WHERE event_id = ?1
             ORDER BY date ASC, start_time ASC, id ASC;"
        ))?;
        let mut rows = stmt.query([event_id])?;
        let mut workshops = Vec::new();
        while let Some(row) = rows.next()? {
            workshops.push(parse_workshop_row(row)?);
        }
        Ok(workshops)
    }

    fn delete_all(&self) -> RepoResult<DeletedCounts> {
        // Count before the cascade from events empties the table.
        let workshops = self.conn.execute("DELETE FROM workshops;", [])?;
        let events = self.conn.execute("DELETE FROM events;", [])?;
        Ok(DeletedCounts { events, workshops })
    }
}

fn parse_event_row(row: &Row<'_>) -> RepoResult<Event> {
    Ok(Event {
        id: row.get("id")?,
        name: row.get("name")?,
        start_date: millis_to_utc(row.get("start_date")?, "events.start_date")?,
        finish_date: millis_to_utc(row.get("finish_date")?, "events.finish_date")?,
        description: row.get("description")?,
        prerequisite: row.get("prerequisite")?,
        period: row.get("period")?,
    })
}

fn parse_workshop_row(row: &Row<'_>) -> RepoResult<Workshop> {
    Ok(Workshop {
        id: row.get("id")?,
        event_id: row.get("event_id")?,
        name: row.get("name")?,
        date: row.get("date")?,
        start_time: row.get("start_time")?,
        end_time: row.get("end_time")?,
        location: row.get("location")?,
    })
}

fn millis_to_utc(value: i64, column: &str) -> RepoResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(value).ok_or_else(|| {
        RepoError::InvalidData(format!("timestamp `{value}` out of range in {column}"))
    })
}
