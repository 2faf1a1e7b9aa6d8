//! Domain model for events, workshops and volunteers.
//!
//! # Responsibility
//! - Define the records produced by the scheduler and read back from storage.
//! - Keep `New*` insert shapes separate from persisted records carrying ids.
//!
//! # Invariants
//! - Identities are assigned by the persistence layer, never by callers.
//! - An Event owns its Workshops; deleting the Event deletes them.

pub mod event;
pub mod volunteer;
pub mod workshop;
