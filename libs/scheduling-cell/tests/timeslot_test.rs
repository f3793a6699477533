use assert_matches::assert_matches;
use chrono::{NaiveDate, NaiveTime};

use scheduling_cell::models::{SchedulingError, TimeSlot};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn slot(d: NaiveDate, h: u32, m: u32, duration: i64) -> TimeSlot {
    TimeSlot::new(d, time(h, m), duration).unwrap()
}

#[test]
fn overlapping_slots_are_detected() {
    let d = date(2024, 6, 10);
    let a = slot(d, 9, 0, 60);
    let b = slot(d, 9, 30, 30);

    assert!(a.overlaps(&b));
}

#[test]
fn overlap_is_symmetric() {
    let d = date(2024, 6, 10);
    let pairs = [
        (slot(d, 9, 0, 60), slot(d, 9, 30, 30)),
        (slot(d, 9, 0, 60), slot(d, 10, 0, 30)),
        (slot(d, 8, 0, 480), slot(d, 12, 0, 15)),
        (slot(d, 9, 0, 60), slot(date(2024, 6, 11), 9, 0, 60)),
    ];

    for (a, b) in pairs {
        assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }
}

#[test]
fn touching_boundaries_do_not_overlap() {
    let d = date(2024, 6, 10);
    let a = slot(d, 9, 0, 60);
    let b = slot(d, 10, 0, 30);

    assert!(!a.overlaps(&b));
    assert!(!b.overlaps(&a));
}

#[test]
fn slots_on_different_dates_never_overlap() {
    let a = slot(date(2024, 6, 10), 9, 0, 60);
    let b = slot(date(2024, 6, 11), 9, 0, 60);

    assert!(!a.overlaps(&b));
}

#[test]
fn a_slot_crossing_midnight_spills_into_the_next_day() {
    // 23:00 + 8h ends 07:00 the following day.
    let late = slot(date(2024, 6, 10), 23, 0, 480);
    let early = slot(date(2024, 6, 11), 6, 0, 30);

    assert!(late.overlaps(&early));
}

#[test]
fn duration_bounds_are_enforced() {
    let d = date(2024, 6, 10);

    assert_matches!(
        TimeSlot::new(d, time(9, 0), 10),
        Err(SchedulingError::ValidationError(_))
    );
    assert_matches!(
        TimeSlot::new(d, time(9, 0), 481),
        Err(SchedulingError::ValidationError(_))
    );
    assert!(TimeSlot::new(d, time(9, 0), 15).is_ok());
    assert!(TimeSlot::new(d, time(9, 0), 480).is_ok());
}

#[test]
fn parse_accepts_both_time_forms() {
    let a = TimeSlot::parse("2024-06-10", "09:30", 60).unwrap();
    let b = TimeSlot::parse("2024-06-10", "09:30:00", 60).unwrap();

    assert_eq!(a, b);
    assert_eq!(a.date, date(2024, 6, 10));
    assert_eq!(a.start_time, time(9, 30));
}

#[test]
fn malformed_input_is_a_typed_failure_not_a_fallback() {
    assert_matches!(
        TimeSlot::parse("tomorrow", "09:00", 60),
        Err(SchedulingError::InvalidTime(_))
    );
    assert_matches!(
        TimeSlot::parse("2024-06-10", "9 o'clock", 60),
        Err(SchedulingError::InvalidTime(_))
    );
}

#[test]
fn display_uses_twelve_hour_form() {
    assert_eq!(slot(date(2024, 6, 10), 14, 30, 60).display_time(), "2:30 PM");
    assert_eq!(slot(date(2024, 6, 10), 9, 5, 60).display_time(), "9:05 AM");
}
