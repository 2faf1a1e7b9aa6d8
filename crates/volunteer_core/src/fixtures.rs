//! Test data generators for volunteers and workshop links.
//!
//! Built in two steps: entities are created first, then an independent
//! Bernoulli filter decides which volunteers get linked to a workshop.
//! Use a seeded RNG (`StdRng::seed_from_u64`) for deterministic tests.

use crate::model::volunteer::{NewVolunteer, Volunteer, VolunteerId, VolunteerLink};
use crate::model::workshop::WorkshopId;
use crate::repo::volunteer_repo::VolunteerRepository;
use crate::repo::RepoResult;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const FIRST_NAMES: &[&str] = &[
    "Alex", "Sam", "Jordan", "Taylor", "Morgan", "Riley", "Casey", "Jamie", "Avery", "Quinn",
];
const LAST_NAMES: &[&str] = &[
    "Nguyen", "Smith", "Chen", "Patel", "Williams", "Kim", "Brown", "Singh", "Jones", "Lee",
];

/// Keeps each candidate independently with probability `probability`.
///
/// Probabilities outside `[0, 1]` are clamped; `NaN` keeps nothing.
pub fn bernoulli_filter<T, R>(
    candidates: impl IntoIterator<Item = T>,
    probability: f64,
    rng: &mut R,
) -> Vec<T>
where
    R: Rng,
{
    let probability = if probability.is_nan() {
        0.0
    } else {
        probability.clamp(0.0, 1.0)
    };
    candidates
        .into_iter()
        .filter(|_| rng.gen_bool(probability))
        .collect()
}

/// Produces fake volunteers with unique usernames.
pub struct VolunteerFactory {
    rng: StdRng,
    sequence: u32,
}

impl VolunteerFactory {
    /// Creates a deterministic factory.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            sequence: 0,
        }
    }

    /// Builds one volunteer insert shape without persisting it.
    pub fn build(&mut self) -> NewVolunteer {
        self.sequence += 1;
        let first_name = FIRST_NAMES.choose(&mut self.rng).copied().unwrap_or("Alex");
        let last_name = LAST_NAMES.choose(&mut self.rng).copied().unwrap_or("Smith");
        let username = format!(
            "{}.{}{}",
            first_name.to_lowercase(),
            last_name.to_lowercase(),
            self.sequence
        );
        NewVolunteer {
            email: format!("{username}@example.com"),
            username,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        }
    }

    /// Builds and persists `count` volunteers.
    pub fn create_many(
        &mut self,
        repo: &impl VolunteerRepository,
        count: usize,
    ) -> RepoResult<Vec<Volunteer>> {
        (0..count)
            .map(|_| -> RepoResult<Volunteer> {
                let new_volunteer = self.build();
                let id = repo.insert_volunteer(&new_volunteer)?;
                Ok(Volunteer {
                    id,
                    username: new_volunteer.username,
                    email: new_volunteer.email,
                    first_name: new_volunteer.first_name,
                    last_name: new_volunteer.last_name,
                })
            })
            .collect()
    }
}

/// Volunteers linked by [`link_random_volunteers`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkReport {
    pub available: Vec<VolunteerId>,
    pub assigned: Vec<VolunteerId>,
}

/// Links random subsets of `volunteers` to a workshop: one independent coin
/// flip per volunteer for availability, another for assignment.
pub fn link_random_volunteers<R>(
    repo: &impl VolunteerRepository,
    workshop_id: WorkshopId,
    volunteers: &[Volunteer],
    probability: f64,
    rng: &mut R,
) -> RepoResult<LinkReport>
where
    R: Rng,
{
    let mut report = LinkReport::default();
    for (link, chosen) in [
        (VolunteerLink::Available, &mut report.available),
        (VolunteerLink::Assigned, &mut report.assigned),
    ] {
        for volunteer in bernoulli_filter(volunteers, probability, rng) {
            repo.link(link, workshop_id, volunteer.id)?;
            chosen.push(volunteer.id);
        }
    }
    Ok(report)
}
