use chrono::{NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use scheduling_cell::models::{
    Appointment, AppointmentPriority, AppointmentStatus, SlotCandidate, TimeSlot,
};
use scheduling_cell::services::conflict::ConflictChecker;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn appointment(
    day: NaiveDate,
    start: NaiveTime,
    duration: i64,
    technician: Option<Uuid>,
) -> Appointment {
    Appointment {
        id: Uuid::new_v4(),
        customer_id: Uuid::new_v4(),
        customer_name: "Dana Whitfield".to_string(),
        vehicle_id: Uuid::new_v4(),
        vehicle_info: "2019 Toyota Camry".to_string(),
        scheduled_date: day,
        scheduled_time: start,
        estimated_duration_minutes: duration,
        service_type: "Brake Inspection".to_string(),
        status: AppointmentStatus::Scheduled,
        priority: AppointmentPriority::Medium,
        technician_id: technician,
        technician_name: technician.map(|_| "Alex Reyes".to_string()),
        notes: None,
        description: None,
        created_date: Utc::now(),
    }
}

fn candidate(
    technician: Option<Uuid>,
    day: NaiveDate,
    start: NaiveTime,
    duration: i64,
) -> SlotCandidate {
    SlotCandidate {
        technician_id: technician,
        slot: TimeSlot::new(day, start, duration).unwrap(),
        exclude_id: None,
    }
}

#[test]
fn overlapping_slot_for_same_technician_is_a_conflict() {
    let checker = ConflictChecker::new();
    let tech = Uuid::new_v4();
    let day = date(2024, 6, 10);
    let existing = vec![appointment(day, time(9, 0), 60, Some(tech))];

    let conflict = checker.find_conflict(&candidate(Some(tech), day, time(9, 30), 30), &existing);
    assert_eq!(conflict.map(|a| a.id), Some(existing[0].id));

    let clear = checker.find_conflict(&candidate(Some(tech), day, time(10, 0), 30), &existing);
    assert!(clear.is_none());
}

#[test]
fn unassigned_candidates_never_conflict() {
    let checker = ConflictChecker::new();
    let tech = Uuid::new_v4();
    let day = date(2024, 6, 10);
    let existing = vec![
        appointment(day, time(9, 0), 60, Some(tech)),
        appointment(day, time(9, 0), 60, None),
    ];

    let conflict = checker.find_conflict(&candidate(None, day, time(9, 0), 60), &existing);
    assert!(conflict.is_none());
}

#[test]
fn different_technician_or_date_is_not_a_conflict() {
    let checker = ConflictChecker::new();
    let tech = Uuid::new_v4();
    let day = date(2024, 6, 10);
    let existing = vec![appointment(day, time(9, 0), 60, Some(tech))];

    let other_tech =
        checker.find_conflict(&candidate(Some(Uuid::new_v4()), day, time(9, 0), 60), &existing);
    assert!(other_tech.is_none());

    let other_day = checker.find_conflict(
        &candidate(Some(tech), date(2024, 6, 11), time(9, 0), 60),
        &existing,
    );
    assert!(other_day.is_none());
}

#[test]
fn excluded_id_does_not_conflict_with_itself() {
    let checker = ConflictChecker::new();
    let tech = Uuid::new_v4();
    let day = date(2024, 6, 10);
    let existing = vec![appointment(day, time(9, 0), 60, Some(tech))];

    let mut c = candidate(Some(tech), day, time(9, 0), 60);
    c.exclude_id = Some(existing[0].id);

    assert!(checker.find_conflict(&c, &existing).is_none());
}

#[test]
fn cancelled_and_no_show_release_their_slot() {
    let checker = ConflictChecker::new();
    let tech = Uuid::new_v4();
    let day = date(2024, 6, 10);

    let mut cancelled = appointment(day, time(9, 0), 60, Some(tech));
    cancelled.status = AppointmentStatus::Cancelled;
    let mut no_show = appointment(day, time(9, 0), 60, Some(tech));
    no_show.status = AppointmentStatus::NoShow;

    let existing = [cancelled, no_show];
    let conflict =
        checker.find_conflict(&candidate(Some(tech), day, time(9, 0), 60), &existing);
    assert!(conflict.is_none());
}

#[test]
fn first_overlapping_appointment_wins() {
    let checker = ConflictChecker::new();
    let tech = Uuid::new_v4();
    let day = date(2024, 6, 10);
    let existing = vec![
        appointment(day, time(9, 0), 60, Some(tech)),
        appointment(day, time(9, 30), 60, Some(tech)),
    ];

    let conflict = checker.find_conflict(&candidate(Some(tech), day, time(9, 15), 90), &existing);
    assert_eq!(conflict.map(|a| a.id), Some(existing[0].id));
}
