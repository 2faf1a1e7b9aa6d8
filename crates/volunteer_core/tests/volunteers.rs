use chrono::NaiveDate;
use chrono_tz::Australia;
use rand::rngs::StdRng;
use rand::SeedableRng;
use volunteer_core::db::open_db_in_memory;
use volunteer_core::fixtures::{link_random_volunteers, VolunteerFactory};
use volunteer_core::{
    demo_event_requests, EventService, RepoError, SchedulerConfig, SqliteVolunteerRepository,
    VolunteerRepository,
};

fn seeded_workshop_ids(conn: &mut rusqlite::Connection) -> Vec<i64> {
    let mut service = EventService::new(conn, SchedulerConfig::new(Australia::Sydney));
    let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
    let event = service
        .create_event_with_workshops_on(today, &demo_event_requests()[1])
        .unwrap();
    service
        .list_workshops(event.id)
        .unwrap()
        .into_iter()
        .map(|workshop| workshop.id)
        .collect()
}

#[test]
fn links_are_idempotent_and_separate_per_relation() {
    let mut conn = open_db_in_memory().unwrap();
    let workshop_ids = seeded_workshop_ids(&mut conn);
    let repo = SqliteVolunteerRepository::new(&conn);
    let volunteers = VolunteerFactory::seeded(3).create_many(&repo, 2).unwrap();

    repo.add_available(workshop_ids[0], volunteers[0].id).unwrap();
    repo.add_available(workshop_ids[0], volunteers[0].id).unwrap();
    repo.add_assigned(workshop_ids[0], volunteers[1].id).unwrap();

    assert_eq!(repo.list_available(workshop_ids[0]).unwrap(), vec![volunteers[0].id]);
    assert_eq!(repo.list_assigned(workshop_ids[0]).unwrap(), vec![volunteers[1].id]);
    assert!(repo.list_available(workshop_ids[1]).unwrap().is_empty());
}

#[test]
fn linking_unknown_volunteer_is_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    let workshop_ids = seeded_workshop_ids(&mut conn);
    let repo = SqliteVolunteerRepository::new(&conn);

    let err = repo.add_assigned(workshop_ids[0], 404).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: "volunteer",
            id: 404
        }
    ));
}

#[test]
fn random_links_are_reproducible_and_persisted() {
    let mut conn = open_db_in_memory().unwrap();
    let workshop_ids = seeded_workshop_ids(&mut conn);
    let repo = SqliteVolunteerRepository::new(&conn);
    let volunteers = VolunteerFactory::seeded(11).create_many(&repo, 20).unwrap();
    assert_eq!(repo.list_volunteers().unwrap(), volunteers);

    let first = link_random_volunteers(
        &repo,
        workshop_ids[0],
        &volunteers,
        0.5,
        &mut StdRng::seed_from_u64(99),
    )
    .unwrap();
    let second = link_random_volunteers(
        &repo,
        workshop_ids[1],
        &volunteers,
        0.5,
        &mut StdRng::seed_from_u64(99),
    )
    .unwrap();

    assert_eq!(first, second);
    assert_eq!(repo.list_available(workshop_ids[0]).unwrap(), first.available);
    assert_eq!(repo.list_assigned(workshop_ids[0]).unwrap(), first.assigned);
}

#[test]
fn probability_extremes_link_nobody_or_everybody() {
    let mut conn = open_db_in_memory().unwrap();
    let workshop_ids = seeded_workshop_ids(&mut conn);
    let repo = SqliteVolunteerRepository::new(&conn);
    let volunteers = VolunteerFactory::seeded(5).create_many(&repo, 8).unwrap();
    let mut rng = StdRng::seed_from_u64(1);

    let none = link_random_volunteers(&repo, workshop_ids[0], &volunteers, 0.0, &mut rng).unwrap();
    assert!(none.available.is_empty() && none.assigned.is_empty());

    let all = link_random_volunteers(&repo, workshop_ids[1], &volunteers, 1.0, &mut rng).unwrap();
    assert_eq!(all.available.len(), 8);
    assert_eq!(all.assigned.len(), 8);
}

#[test]
fn deleting_workshops_removes_their_links() {
    let mut conn = open_db_in_memory().unwrap();
    let workshop_ids = seeded_workshop_ids(&mut conn);
    {
        let repo = SqliteVolunteerRepository::new(&conn);
        let volunteers = VolunteerFactory::seeded(2).create_many(&repo, 3).unwrap();
        for volunteer in &volunteers {
            repo.add_assigned(workshop_ids[0], volunteer.id).unwrap();
        }
    }

    EventService::new(&mut conn, SchedulerConfig::default())
        .clean()
        .unwrap();

    let remaining: i64 = conn
        .query_row("SELECT COUNT(*) FROM workshop_assigned;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(remaining, 0);
    let volunteers: i64 = conn
        .query_row("SELECT COUNT(*) FROM volunteers;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(volunteers, 3);
}
