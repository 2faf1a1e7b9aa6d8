//! Repository layer abstractions and SQLite implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for events, workshops
//!   and volunteers.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repositories borrow a connection and never open or commit transactions
//!   themselves; callers decide the transaction scope.
//! - Read paths reject malformed persisted values instead of masking them.

pub mod event_repo;
pub mod volunteer_repo;

use crate::db::DbError;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by event and volunteer persistence.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },
    #[error("invalid persisted data: {0}")]
    InvalidData(String),
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
