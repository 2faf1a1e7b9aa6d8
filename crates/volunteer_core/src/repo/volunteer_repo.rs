//! Volunteer repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Store volunteers and their availability/assignment links to workshops.
//!
//! # Invariants
//! - A (workshop, volunteer) pair appears at most once per link relation;
//!   repeated links are no-ops.
//! - Links to unknown workshops or volunteers are rejected as not found.

use crate::model::volunteer::{NewVolunteer, Volunteer, VolunteerId, VolunteerLink};
use crate::model::workshop::WorkshopId;
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension};

/// Repository interface for volunteers and workshop links.
pub trait VolunteerRepository {
    fn insert_volunteer(&self, volunteer: &NewVolunteer) -> RepoResult<VolunteerId>;
    /// Lists volunteers by id.
    fn list_volunteers(&self) -> RepoResult<Vec<Volunteer>>;
    /// Links a volunteer to a workshop in the given relation.
    fn link(
        &self,
        link: VolunteerLink,
        workshop_id: WorkshopId,
        volunteer_id: VolunteerId,
    ) -> RepoResult<()>;
    /// Volunteer ids linked to a workshop, ascending.
    fn linked_volunteers(
        &self,
        link: VolunteerLink,
        workshop_id: WorkshopId,
    ) -> RepoResult<Vec<VolunteerId>>;

    fn add_available(&self, workshop_id: WorkshopId, volunteer_id: VolunteerId) -> RepoResult<()> {
        self.link(VolunteerLink::Available, workshop_id, volunteer_id)
    }

    fn add_assigned(&self, workshop_id: WorkshopId, volunteer_id: VolunteerId) -> RepoResult<()> {
        self.link(VolunteerLink::Assigned, workshop_id, volunteer_id)
    }

    fn list_available(&self, workshop_id: WorkshopId) -> RepoResult<Vec<VolunteerId>> {
        self.linked_volunteers(VolunteerLink::Available, workshop_id)
    }

    fn list_assigned(&self, workshop_id: WorkshopId) -> RepoResult<Vec<VolunteerId>> {
        self.linked_volunteers(VolunteerLink::Assigned, workshop_id)
    }
}

/// SQLite-backed volunteer repository.
pub struct SqliteVolunteerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteVolunteerRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl VolunteerRepository for SqliteVolunteerRepository<'_> {
    fn insert_volunteer(&self, volunteer: &NewVolunteer) -> RepoResult<VolunteerId> {
        self.conn.execute(
            "INSERT INTO volunteers (username, email, first_name, last_name)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                volunteer.username.as_str(),
                volunteer.email.as_str(),
                volunteer.first_name.as_str(),
                volunteer.last_name.as_str(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn list_volunteers(&self) -> RepoResult<Vec<Volunteer>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, username, email, first_name, last_name
             FROM volunteers
             ORDER BY id ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut volunteers = Vec::new();
        while let Some(row) = rows.next()? {
            volunteers.push(Volunteer {
                id: row.get("id")?,
                username: row.get("username")?,
                email: row.get("email")?,
                first_name: row.get("first_name")?,
                last_name: row.get("last_name")?,
            });
        }
        Ok(volunteers)
    }

    fn link(
        &self,
        link: VolunteerLink,
        workshop_id: WorkshopId,
        volunteer_id: VolunteerId,
    ) -> RepoResult<()> {
        ensure_exists(self.conn, "workshops", "workshop", workshop_id)?;
        ensure_exists(self.conn, "volunteers", "volunteer", volunteer_id)?;
        self.conn.execute(
            &format!(
                "INSERT OR IGNORE INTO {} (workshop_id, volunteer_id) VALUES (?1, ?2);",
                link_table(link)
            ),
            params![workshop_id, volunteer_id],
        )?;
        Ok(())
    }

    fn linked_volunteers(
        &self,
        link: VolunteerLink,
        workshop_id: WorkshopId,
    ) -> RepoResult<Vec<VolunteerId>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT volunteer_id FROM {} WHERE workshop_id = ?1 ORDER BY volunteer_id ASC;",
            link_table(link)
        ))?;
        let mut rows = stmt.query([workshop_id])?;
        let mut ids = Vec::new();
        while let Some(row) = rows.next()? {
            ids.push(row.get(0)?);
        }
        Ok(ids)
    }
}

fn link_table(link: VolunteerLink) -> &'static str {
    match link {
        VolunteerLink::Available => "workshop_available",
        VolunteerLink::Assigned => "workshop_assigned",
    }
}

fn ensure_exists(
    conn: &Connection,
    table: &'static str,
    entity: &'static str,
    id: i64,
) -> RepoResult<()> {
    let found = conn
        .query_row(&format!("SELECT 1 FROM {table} WHERE id = ?1;"), [id], |row| {
            row.get::<_, i64>(0)
        })
        .optional()?;
    match found {
        Some(_) => Ok(()),
        None => Err(RepoError::NotFound { entity, id }),
    }
}
