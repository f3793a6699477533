// libs/scheduling-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::error::AppError;

use crate::models::{
    AppointmentQuery, CreateAppointmentRequest, RecordState, SchedulingError, SlotCandidate,
    StatusUpdateRequest, TimeSlot, UpdateAppointmentRequest,
};
use crate::services::calendar::CalendarView;
use crate::services::scheduling::SchedulingService;

// ==============================================================================
// QUERY PARAMETER STRUCTS
// ==============================================================================

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub view: CalendarView,
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct ConflictCheckQuery {
    pub technician_id: Option<Uuid>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub duration_minutes: i64,
    pub exclude_appointment_id: Option<Uuid>,
}

fn map_err(e: SchedulingError) -> AppError {
    match e {
        SchedulingError::NotFound => AppError::NotFound("Appointment not found".to_string()),
        SchedulingError::ValidationError(msg) => AppError::ValidationError(msg),
        SchedulingError::InvalidTime(msg) => AppError::BadRequest(msg),
        SchedulingError::ConflictDetected { .. } => AppError::Conflict(e.to_string()),
        SchedulingError::InvalidStatusTransition { .. } => AppError::BadRequest(e.to_string()),
        SchedulingError::StoreError(msg) => AppError::ExternalService(msg),
    }
}

// ==============================================================================
// APPOINTMENT HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn create_appointment(
    State(service): State<Arc<SchedulingService>>,
    Json(request): Json<CreateAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let outcome = service
        .create_appointment(request)
        .await
        .map_err(map_err)?;

    let message = match outcome.record_state {
        RecordState::Committed => "Appointment booked successfully",
        RecordState::Pending => "Records service unavailable, appointment held locally",
    };

    Ok(Json(json!({
        "success": true,
        "appointment": outcome.appointment,
        "record_state": outcome.record_state,
        "message": message
    })))
}

#[axum::debug_handler]
pub async fn list_appointments(
    State(service): State<Arc<SchedulingService>>,
    Query(query): Query<AppointmentQuery>,
) -> Result<Json<Value>, AppError> {
    let appointments = service.search_appointments(query).await.map_err(map_err)?;

    Ok(Json(json!({
        "appointments": appointments,
        "total": appointments.len()
    })))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(service): State<Arc<SchedulingService>>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let appointment = service
        .get_appointment(appointment_id)
        .await
        .map_err(map_err)?;

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn update_appointment(
    State(service): State<Arc<SchedulingService>>,
    Path(appointment_id): Path<Uuid>,
    Json(request): Json<UpdateAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let appointment = service
        .update_appointment(appointment_id, request)
        .await
        .map_err(map_err)?;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment,
        "message": "Appointment updated successfully"
    })))
}

#[axum::debug_handler]
pub async fn update_appointment_status(
    State(service): State<Arc<SchedulingService>>,
    Path(appointment_id): Path<Uuid>,
    Json(request): Json<StatusUpdateRequest>,
) -> Result<Json<Value>, AppError> {
    let appointment = service
        .transition_status(appointment_id, request)
        .await
        .map_err(map_err)?;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment,
        "message": "Appointment status updated"
    })))
}

#[axum::debug_handler]
pub async fn delete_appointment(
    State(service): State<Arc<SchedulingService>>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    service
        .delete_appointment(appointment_id)
        .await
        .map_err(map_err)?;

    Ok(Json(json!({
        "success": true,
        "message": "Appointment deleted"
    })))
}

// ==============================================================================
// CALENDAR AND CONFLICT HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn get_calendar(
    State(service): State<Arc<SchedulingService>>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<Value>, AppError> {
    let days = service
        .calendar(query.date, query.view)
        .await
        .map_err(map_err)?;

    Ok(Json(json!({
        "view": query.view,
        "reference_date": query.date,
        "days": days
    })))
}

#[axum::debug_handler]
pub async fn check_appointment_conflicts(
    State(service): State<Arc<SchedulingService>>,
    Query(params): Query<ConflictCheckQuery>,
) -> Result<Json<Value>, AppError> {
    let slot =
        TimeSlot::new(params.date, params.time, params.duration_minutes).map_err(map_err)?;

    let response = service
        .check_conflict(SlotCandidate {
            technician_id: params.technician_id,
            slot,
            exclude_id: params.exclude_appointment_id,
        })
        .await
        .map_err(map_err)?;

    Ok(Json(json!(response)))
}
