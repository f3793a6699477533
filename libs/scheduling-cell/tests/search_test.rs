use chrono::{NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use scheduling_cell::models::{Appointment, AppointmentPriority, AppointmentStatus};
use scheduling_cell::services::search::{AppointmentFilter, SearchFilterEngine};

fn appointment(customer: &str, vehicle: &str, service: &str) -> Appointment {
    Appointment {
        id: Uuid::new_v4(),
        customer_id: Uuid::new_v4(),
        customer_name: customer.to_string(),
        vehicle_id: Uuid::new_v4(),
        vehicle_info: vehicle.to_string(),
        scheduled_date: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
        scheduled_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        estimated_duration_minutes: 60,
        service_type: service.to_string(),
        status: AppointmentStatus::Scheduled,
        priority: AppointmentPriority::Medium,
        technician_id: None,
        technician_name: None,
        notes: None,
        description: None,
        created_date: Utc::now(),
    }
}

#[test]
fn text_search_is_case_insensitive() {
    let engine = SearchFilterEngine::new();
    let a = appointment("Dana Whitfield", "2019 TOYOTA Camry", "Oil Change");

    assert!(engine.matches(&a, "toyota"));
    assert!(engine.matches(&a, "TOYOTA"));
    assert!(engine.matches(&a, "ToYoTa"));
    assert!(!engine.matches(&a, "honda"));
}

#[test]
fn text_search_covers_all_haystack_fields() {
    let engine = SearchFilterEngine::new();
    let mut a = appointment("Dana Whitfield", "2019 Toyota Camry", "Brake Inspection");
    a.technician_name = Some("Alex Reyes".to_string());
    a.notes = Some("customer waiting on site".to_string());
    a.description = Some("front rotors grinding".to_string());

    assert!(engine.matches(&a, "whitfield"));
    assert!(engine.matches(&a, "camry"));
    assert!(engine.matches(&a, "brake"));
    assert!(engine.matches(&a, "reyes"));
    assert!(engine.matches(&a, "waiting"));
    assert!(engine.matches(&a, "rotors"));
}

#[test]
fn blank_query_matches_everything() {
    let engine = SearchFilterEngine::new();
    let a = appointment("Dana Whitfield", "2019 Toyota Camry", "Oil Change");

    assert!(engine.matches(&a, ""));
    assert!(engine.matches(&a, "   "));

    let unfiltered = engine.filter(&[a.clone()], &AppointmentFilter::default());
    assert_eq!(unfiltered.len(), 1);
}

#[test]
fn predicates_combine_with_and_semantics() {
    let engine = SearchFilterEngine::new();
    let tech = Uuid::new_v4();

    let mut matching = appointment("Dana Whitfield", "2019 Toyota Camry", "Oil Change");
    matching.status = AppointmentStatus::Confirmed;
    matching.technician_id = Some(tech);

    let mut wrong_status = matching.clone();
    wrong_status.id = Uuid::new_v4();
    wrong_status.status = AppointmentStatus::Scheduled;

    let mut wrong_tech = matching.clone();
    wrong_tech.id = Uuid::new_v4();
    wrong_tech.technician_id = Some(Uuid::new_v4());

    let filter = AppointmentFilter {
        status: Some(AppointmentStatus::Confirmed),
        technician_id: Some(tech),
        query: Some("toyota".to_string()),
    };

    let result = engine.filter(&[matching.clone(), wrong_status, wrong_tech], &filter);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, matching.id);
}

#[test]
fn filtering_preserves_input_order_and_is_idempotent() {
    let engine = SearchFilterEngine::new();
    let appointments = vec![
        appointment("Alice Tran", "2020 Toyota RAV4", "Oil Change"),
        appointment("Bob Okafor", "2018 Honda Civic", "Tire Rotation"),
        appointment("Carol Mendez", "2021 Toyota Corolla", "Oil Change"),
    ];
    let filter = AppointmentFilter {
        status: None,
        technician_id: None,
        query: Some("toyota".to_string()),
    };

    let once = engine.filter(&appointments, &filter);
    let ids: Vec<Uuid> = once.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![appointments[0].id, appointments[2].id]);

    let twice = engine.filter(&once, &filter);
    let ids_again: Vec<Uuid> = twice.iter().map(|a| a.id).collect();
    assert_eq!(ids, ids_again);
}
