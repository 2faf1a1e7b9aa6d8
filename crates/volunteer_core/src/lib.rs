//! Core domain logic for volunteer event management.
//! This crate is the single source of truth for event/workshop scheduling.

pub mod config;
pub mod db;
pub mod fixtures;
pub mod logging;
pub mod model;
pub mod repo;
pub mod schedule;
pub mod service;

pub use config::{AppConfig, ConfigError, SchedulerConfig};
pub use logging::{default_log_level, init_logging, init_stderr_logging, logging_status};
pub use model::event::{Event, EventId, NewEvent};
pub use model::volunteer::{NewVolunteer, Volunteer, VolunteerId, VolunteerLink};
pub use model::workshop::{NewWorkshop, Workshop, WorkshopId};
pub use repo::event_repo::{DeletedCounts, EventRepository, SqliteEventRepository};
pub use repo::volunteer_repo::{SqliteVolunteerRepository, VolunteerRepository};
pub use repo::{RepoError, RepoResult};
pub use schedule::{plan_event_schedule, EventPlan, EventRequest, ScheduleError};
pub use service::event_service::{EventService, EventServiceError, ServiceResult};
pub use service::seed::{demo_event_requests, SeedReport};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
