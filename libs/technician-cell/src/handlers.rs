// libs/technician-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::TechnicianQueryParams;
use crate::services::directory::TechnicianDirectoryService;

#[axum::debug_handler]
pub async fn list_technicians(
    State(state): State<Arc<AppConfig>>,
    Query(params): Query<TechnicianQueryParams>,
) -> Result<Json<Value>, AppError> {
    let directory = TechnicianDirectoryService::new(&state);

    let technicians = directory
        .list_technicians(params.active_only.unwrap_or(false))
        .await
        .map_err(|e| AppError::ExternalService(e.to_string()))?;

    Ok(Json(json!({
        "technicians": technicians,
        "total": technicians.len()
    })))
}

#[axum::debug_handler]
pub async fn get_technician(
    State(state): State<Arc<AppConfig>>,
    Path(technician_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let directory = TechnicianDirectoryService::new(&state);

    let technician = directory
        .get_technician(technician_id)
        .await
        .map_err(|e| AppError::ExternalService(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Technician not found".to_string()))?;

    Ok(Json(json!(technician)))
}
