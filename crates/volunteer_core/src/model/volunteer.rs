//! Volunteer records and their links to workshops.

use serde::{Deserialize, Serialize};

/// Persistence-assigned volunteer identity.
pub type VolunteerId = i64;

/// Insert shape for a volunteer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVolunteer {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// A stored volunteer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volunteer {
    pub id: VolunteerId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// Which workshop relation a volunteer link belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolunteerLink {
    /// Volunteer declared availability for the workshop.
    Available,
    /// Staff assigned the volunteer to the workshop.
    Assigned,
}
