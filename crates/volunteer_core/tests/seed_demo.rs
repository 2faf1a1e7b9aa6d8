use chrono::{NaiveDate, TimeDelta};
use chrono_tz::Australia;
use rusqlite::Connection;
use volunteer_core::db::open_db_in_memory;
use volunteer_core::schedule::utc_to_local;
use volunteer_core::{demo_event_requests, EventService, SchedulerConfig};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

fn count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
        row.get(0)
    })
    .unwrap()
}

#[test]
fn demo_requests_match_fixed_dataset() {
    let requests = demo_event_requests();
    let summary = requests
        .iter()
        .map(|request| (request.days_from_now, request.week_count, request.location.as_str()))
        .collect::<Vec<_>>();
    assert_eq!(
        summary,
        vec![
            (10, 1, "UNSW K17 chi lab"),
            (15, 6, "UNSW K17 oud lab"),
            (28, 7, "UNSW K17 lyre lab"),
        ]
    );
}

#[test]
fn seeding_creates_three_events_with_weekly_workshops() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = EventService::new(&mut conn, SchedulerConfig::new(Australia::Sydney));

    let report = service.seed_demo_data_on(today(), false).unwrap();
    assert!(report.deleted.is_none());

    let names = report
        .events
        .iter()
        .map(|event| event.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(
        names,
        vec![
            "Test: single-workshop event",
            "Intro to Programming",
            "Test: Advanced Web Development",
        ]
    );

    let workshop_counts = report
        .events
        .iter()
        .map(|event| service.list_workshops(event.id).unwrap().len())
        .collect::<Vec<_>>();
    assert_eq!(workshop_counts, vec![1, 6, 7]);

    let advanced = &report.events[2];
    let finish = utc_to_local(advanced.finish_date, Australia::Sydney).date();
    assert_eq!(finish, today() + TimeDelta::days(28 + 7 * 7 - 6));
}

#[test]
fn seeding_twice_without_clean_duplicates_data() {
    let mut conn = open_db_in_memory().unwrap();
    {
        let mut service = EventService::new(&mut conn, SchedulerConfig::default());
        service.seed_demo_data_on(today(), false).unwrap();
        service.seed_demo_data_on(today(), false).unwrap();
    }
    assert_eq!(count(&conn, "events"), 6);
    assert_eq!(count(&conn, "workshops"), 28);
}

#[test]
fn seeding_with_clean_replaces_existing_data() {
    let mut conn = open_db_in_memory().unwrap();
    let report = {
        let mut service = EventService::new(&mut conn, SchedulerConfig::default());
        service.seed_demo_data_on(today(), false).unwrap();
        service.seed_demo_data_on(today(), true).unwrap()
    };

    let deleted = report.deleted.unwrap();
    assert_eq!(deleted.events, 3);
    assert_eq!(deleted.workshops, 14);
    assert_eq!(count(&conn, "events"), 3);
    assert_eq!(count(&conn, "workshops"), 14);
}

#[test]
fn failed_seed_keeps_previous_data_even_with_clean() {
    let mut conn = open_db_in_memory().unwrap();
    {
        let mut service = EventService::new(&mut conn, SchedulerConfig::default());
        service.seed_demo_data_on(today(), false).unwrap();
    }
    conn.execute_batch(
        "CREATE TEMP TRIGGER fail_lyre_lab
         BEFORE INSERT ON workshops
         WHEN NEW.location = 'UNSW K17 lyre lab'
         BEGIN
             SELECT RAISE(ABORT, 'forced workshop failure');
         END;",
    )
    .unwrap();

    let result = {
        let mut service = EventService::new(&mut conn, SchedulerConfig::default());
        service.seed_demo_data_on(today(), true)
    };

    assert!(result.is_err());
    assert_eq!(count(&conn, "events"), 3);
    assert_eq!(count(&conn, "workshops"), 14);
}
