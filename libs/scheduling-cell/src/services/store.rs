// libs/scheduling-cell/src/services/store.rs
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_store::{Method, RecordsClient};

use crate::models::{Appointment, AppointmentDraft, AppointmentQuery, SchedulingError};

/// Persistence boundary for appointments. The scheduling core operates on
/// snapshots and mutates the collection only through this trait, so grid
/// building and filtering stay unit-testable without a live backend.
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    async fn list(&self, query: &AppointmentQuery) -> Result<Vec<Appointment>, SchedulingError>;
    async fn get(&self, id: Uuid) -> Result<Appointment, SchedulingError>;
    /// The store assigns the id, never the core.
    async fn create(&self, draft: &AppointmentDraft) -> Result<Appointment, SchedulingError>;
    async fn update(&self, id: Uuid, patch: &Value) -> Result<Appointment, SchedulingError>;
    async fn delete(&self, id: Uuid) -> Result<(), SchedulingError>;
}

/// Server-side filter scope: status, technician, date range. Free-text search
/// is always applied client-side by the SearchFilterEngine.
pub(crate) fn in_scope(appointment: &Appointment, query: &AppointmentQuery) -> bool {
    if let Some(status) = query.status {
        if appointment.status != status {
            return false;
        }
    }
    if let Some(technician_id) = query.technician_id {
        if appointment.technician_id != Some(technician_id) {
            return false;
        }
    }
    if let Some(from) = query.from_date {
        if appointment.scheduled_date < from {
            return false;
        }
    }
    if let Some(to) = query.to_date {
        if appointment.scheduled_date > to {
            return false;
        }
    }
    true
}

fn store_err(e: anyhow::Error) -> SchedulingError {
    SchedulingError::StoreError(e.to_string())
}

// ==============================================================================
// HTTP-BACKED STORE (the records service)
// ==============================================================================

pub struct HttpAppointmentStore {
    records: RecordsClient,
}

impl HttpAppointmentStore {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            records: RecordsClient::new(config),
        }
    }
}

#[async_trait]
impl AppointmentStore for HttpAppointmentStore {
    async fn list(&self, query: &AppointmentQuery) -> Result<Vec<Appointment>, SchedulingError> {
        let mut params = Vec::new();
        if let Some(status) = query.status {
            params.push(format!("status={}", status));
        }
        if let Some(technician_id) = query.technician_id {
            params.push(format!("technician_id={}", technician_id));
        }
        if let Some(from) = query.from_date {
            params.push(format!("from_date={}", from));
        }
        if let Some(to) = query.to_date {
            params.push(format!("to_date={}", to));
        }

        let path = if params.is_empty() {
            "/api/v1/appointments".to_string()
        } else {
            format!("/api/v1/appointments?{}", params.join("&"))
        };

        self.records
            .request(Method::GET, &path, None)
            .await
            .map_err(store_err)
    }

    async fn get(&self, id: Uuid) -> Result<Appointment, SchedulingError> {
        self.records
            .request_optional(Method::GET, &format!("/api/v1/appointments/{}", id), None)
            .await
            .map_err(store_err)?
            .ok_or(SchedulingError::NotFound)
    }

    async fn create(&self, draft: &AppointmentDraft) -> Result<Appointment, SchedulingError> {
        let body = serde_json::to_value(draft)
            .map_err(|e| SchedulingError::StoreError(format!("Failed to encode draft: {}", e)))?;

        self.records
            .request(Method::POST, "/api/v1/appointments", Some(body))
            .await
            .map_err(store_err)
    }

    async fn update(&self, id: Uuid, patch: &Value) -> Result<Appointment, SchedulingError> {
        self.records
            .request_optional(
                Method::PATCH,
                &format!("/api/v1/appointments/{}", id),
                Some(patch.clone()),
            )
            .await
            .map_err(store_err)?
            .ok_or(SchedulingError::NotFound)
    }

    async fn delete(&self, id: Uuid) -> Result<(), SchedulingError> {
        let deleted = self
            .records
            .request_no_content(Method::DELETE, &format!("/api/v1/appointments/{}", id))
            .await
            .map_err(store_err)?;

        if deleted {
            Ok(())
        } else {
            Err(SchedulingError::NotFound)
        }
    }
}

// ==============================================================================
// IN-MEMORY STORE (tests, offline use)
// ==============================================================================

#[derive(Default)]
pub struct InMemoryAppointmentStore {
    appointments: RwLock<Vec<Appointment>>,
}

impl InMemoryAppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AppointmentStore for InMemoryAppointmentStore {
    async fn list(&self, query: &AppointmentQuery) -> Result<Vec<Appointment>, SchedulingError> {
        let guard = self.appointments.read().await;
        Ok(guard
            .iter()
            .filter(|a| in_scope(a, query))
            .cloned()
            .collect())
    }

    async fn get(&self, id: Uuid) -> Result<Appointment, SchedulingError> {
        let guard = self.appointments.read().await;
        guard
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or(SchedulingError::NotFound)
    }

    async fn create(&self, draft: &AppointmentDraft) -> Result<Appointment, SchedulingError> {
        let appointment = draft.clone().into_appointment(Uuid::new_v4());
        let mut guard = self.appointments.write().await;
        guard.push(appointment.clone());
        Ok(appointment)
    }

    async fn update(&self, id: Uuid, patch: &Value) -> Result<Appointment, SchedulingError> {
        let mut guard = self.appointments.write().await;
        let existing = guard
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(SchedulingError::NotFound)?;

        let mut merged = serde_json::to_value(&*existing)
            .map_err(|e| SchedulingError::StoreError(format!("Failed to encode record: {}", e)))?;
        if let (Value::Object(base), Value::Object(fields)) = (&mut merged, patch) {
            for (key, value) in fields {
                base.insert(key.clone(), value.clone());
            }
            // The id is store-owned and immutable.
            base.insert("id".to_string(), serde_json::json!(id));
        }

        let updated: Appointment = serde_json::from_value(merged)
            .map_err(|e| SchedulingError::StoreError(format!("Malformed patch: {}", e)))?;
        *existing = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<(), SchedulingError> {
        let mut guard = self.appointments.write().await;
        let before = guard.len();
        guard.retain(|a| a.id != id);
        if guard.len() == before {
            return Err(SchedulingError::NotFound);
        }
        Ok(())
    }
}
