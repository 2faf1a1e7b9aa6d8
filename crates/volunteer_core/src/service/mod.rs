//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate schedule planning and repository writes into use cases.
//! - Own transaction scope so callers never observe partial writes.

pub mod event_service;
pub mod seed;
