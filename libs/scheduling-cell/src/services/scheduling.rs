// libs/scheduling-cell/src/services/scheduling.rs
use std::sync::Arc;

use chrono::{Local, NaiveDate, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::{
    Appointment, AppointmentDraft, AppointmentPriority, AppointmentQuery, AppointmentStatus,
    ConflictCheckResponse, CreateAppointmentOutcome, CreateAppointmentRequest, RecordState,
    SchedulingError, SlotCandidate, StatusUpdateRequest, TimeSlot, UpdateAppointmentRequest,
};
use crate::services::calendar::{CalendarGridBuilder, CalendarView, DayBucket};
use crate::services::conflict::ConflictChecker;
use crate::services::ledger::PendingLedger;
use crate::services::lifecycle::AppointmentLifecycleService;
use crate::services::search::{AppointmentFilter, SearchFilterEngine};
use crate::services::store::{self, AppointmentStore};

/// Orchestrates the scheduling core: every mutation runs the conflict check
/// and lifecycle validation before touching the store; every read is a fresh
/// snapshot (store records plus locally pending ones).
pub struct SchedulingService {
    store: Arc<dyn AppointmentStore>,
    pending: RwLock<PendingLedger>,
    calendar: CalendarGridBuilder,
    conflicts: ConflictChecker,
    lifecycle: AppointmentLifecycleService,
    search: SearchFilterEngine,
}

impl SchedulingService {
    pub fn new(store: Arc<dyn AppointmentStore>) -> Self {
        Self {
            store,
            pending: RwLock::new(PendingLedger::new()),
            calendar: CalendarGridBuilder::new(),
            conflicts: ConflictChecker::new(),
            lifecycle: AppointmentLifecycleService::new(),
            search: SearchFilterEngine::new(),
        }
    }

    /// Fresh snapshot of the collection within the query's scope. Pending
    /// records are merged in so degraded creates stay visible.
    async fn snapshot(&self, query: &AppointmentQuery) -> Result<Vec<Appointment>, SchedulingError> {
        let mut appointments = self.store.list(query).await?;
        let ledger = self.pending.read().await;
        appointments.extend(
            ledger
                .snapshot()
                .into_iter()
                .filter(|a| store::in_scope(a, query)),
        );
        Ok(appointments)
    }

    async fn find_slot_conflict(
        &self,
        candidate: &SlotCandidate,
    ) -> Result<Option<Appointment>, SchedulingError> {
        let scope = AppointmentQuery {
            from_date: Some(candidate.slot.date),
            to_date: Some(candidate.slot.date),
            ..Default::default()
        };
        let existing = self.snapshot(&scope).await?;
        Ok(self.conflicts.find_conflict(candidate, &existing).cloned())
    }

    // ==========================================================================
    // MUTATIONS
    // ==========================================================================

    pub async fn create_appointment(
        &self,
        request: CreateAppointmentRequest,
    ) -> Result<CreateAppointmentOutcome, SchedulingError> {
        debug!(
            "Booking appointment for {} on {} at {}",
            request.customer_name, request.scheduled_date, request.scheduled_time
        );

        validate_required(&request.customer_name, "customer name")?;
        validate_required(&request.vehicle_info, "vehicle info")?;
        validate_required(&request.service_type, "service type")?;

        let slot = TimeSlot::new(
            request.scheduled_date,
            request.scheduled_time,
            request.estimated_duration_minutes,
        )?;

        let candidate = SlotCandidate {
            technician_id: request.technician_id,
            slot,
            exclude_id: None,
        };
        if let Some(conflict) = self.find_slot_conflict(&candidate).await? {
            if !request.override_conflict {
                return Err(SchedulingError::ConflictDetected {
                    conflicting_id: conflict.id,
                });
            }
            warn!(
                "Conflict with appointment {} overridden by caller",
                conflict.id
            );
        }

        let draft = AppointmentDraft {
            customer_id: request.customer_id,
            customer_name: request.customer_name,
            vehicle_id: request.vehicle_id,
            vehicle_info: request.vehicle_info,
            scheduled_date: request.scheduled_date,
            scheduled_time: request.scheduled_time,
            estimated_duration_minutes: request.estimated_duration_minutes,
            service_type: request.service_type,
            status: AppointmentStatus::Scheduled,
            priority: request.priority.unwrap_or(AppointmentPriority::Medium),
            technician_id: request.technician_id,
            technician_name: request.technician_name,
            notes: request.notes,
            description: request.description,
            created_date: Utc::now(),
        };

        match self.store.create(&draft).await {
            Ok(appointment) => {
                info!("Appointment {} booked", appointment.id);
                Ok(CreateAppointmentOutcome {
                    appointment,
                    record_state: RecordState::Committed,
                })
            }
            Err(e) => {
                // Degraded-but-available: keep the record locally; no retry.
                warn!("Records service rejected create ({}), keeping record locally", e);
                let appointment = draft.into_appointment(Uuid::new_v4());
                self.pending.write().await.push(appointment.clone());
                Ok(CreateAppointmentOutcome {
                    appointment,
                    record_state: RecordState::Pending,
                })
            }
        }
    }

    pub async fn update_appointment(
        &self,
        id: Uuid,
        request: UpdateAppointmentRequest,
    ) -> Result<Appointment, SchedulingError> {
        let current = self.get_appointment(id).await?;

        if let Some(new_status) = request.status {
            self.lifecycle
                .validate_or_force(current.status, new_status, request.force_status)?;
        }

        let updated = apply_update(&current, &request);
        validate_required(&updated.customer_name, "customer name")?;
        validate_required(&updated.vehicle_info, "vehicle info")?;
        validate_required(&updated.service_type, "service type")?;

        let slot = TimeSlot::new(
            updated.scheduled_date,
            updated.scheduled_time,
            updated.estimated_duration_minutes,
        )?;

        let slot_changed = updated.technician_id != current.technician_id
            || updated.scheduled_date != current.scheduled_date
            || updated.scheduled_time != current.scheduled_time
            || updated.estimated_duration_minutes != current.estimated_duration_minutes;

        if slot_changed {
            let candidate = SlotCandidate {
                technician_id: updated.technician_id,
                slot,
                exclude_id: Some(id),
            };
            if let Some(conflict) = self.find_slot_conflict(&candidate).await? {
                if !request.override_conflict {
                    return Err(SchedulingError::ConflictDetected {
                        conflicting_id: conflict.id,
                    });
                }
                warn!(
                    "Conflict with appointment {} overridden by caller",
                    conflict.id
                );
            }
        }

        self.persist_replacement(updated).await
    }

    pub async fn transition_status(
        &self,
        id: Uuid,
        request: StatusUpdateRequest,
    ) -> Result<Appointment, SchedulingError> {
        let mut current = self.get_appointment(id).await?;

        self.lifecycle
            .validate_or_force(current.status, request.status, request.force)?;

        info!(
            "Appointment {} status: {} -> {}",
            id, current.status, request.status
        );
        current.status = request.status;
        self.persist_replacement(current).await
    }

    pub async fn delete_appointment(&self, id: Uuid) -> Result<(), SchedulingError> {
        if self.pending.write().await.remove(id) {
            info!("Pending appointment {} discarded locally", id);
            return Ok(());
        }
        // No optimistic local mutation: the record stays until the store confirms.
        self.store.delete(id).await?;
        info!("Appointment {} deleted", id);
        Ok(())
    }

    /// Atomic replace-on-success: in-memory state changes only when the store
    /// (or the pending ledger, for degraded records) accepts the new record.
    async fn persist_replacement(
        &self,
        updated: Appointment,
    ) -> Result<Appointment, SchedulingError> {
        {
            let mut ledger = self.pending.write().await;
            if ledger.contains(updated.id) {
                ledger.replace(updated.clone());
                return Ok(updated);
            }
        }

        let patch = serde_json::to_value(&updated)
            .map_err(|e| SchedulingError::StoreError(format!("Failed to encode record: {}", e)))?;
        self.store.update(updated.id, &patch).await
    }

    // ==========================================================================
    // READ-ONLY PROJECTIONS
    // ==========================================================================

    pub async fn get_appointment(&self, id: Uuid) -> Result<Appointment, SchedulingError> {
        if let Some(appointment) = self.pending.read().await.get(id) {
            return Ok(appointment.clone());
        }
        self.store.get(id).await
    }

    /// List view: store scope filters, then the client-side search engine.
    /// Ordered by (date, time) with priority weight breaking ties.
    pub async fn search_appointments(
        &self,
        query: AppointmentQuery,
    ) -> Result<Vec<Appointment>, SchedulingError> {
        let mut appointments = self.snapshot(&query).await?;

        appointments.sort_by(|a, b| {
            a.scheduled_date
                .cmp(&b.scheduled_date)
                .then(a.scheduled_time.cmp(&b.scheduled_time))
                .then(b.priority.weight().cmp(&a.priority.weight()))
        });

        let filter = AppointmentFilter {
            status: query.status,
            technician_id: query.technician_id,
            query: query.q,
        };
        Ok(self.search.filter(&appointments, &filter))
    }

    pub async fn calendar(
        &self,
        reference: NaiveDate,
        view: CalendarView,
    ) -> Result<Vec<DayBucket>, SchedulingError> {
        let (from, to) = self.calendar.grid_range(reference, view);
        let appointments = self
            .snapshot(&AppointmentQuery {
                from_date: Some(from),
                to_date: Some(to),
                ..Default::default()
            })
            .await?;

        let today = Local::now().date_naive();
        Ok(self.calendar.build_grid(reference, view, &appointments, today))
    }

    pub async fn check_conflict(
        &self,
        candidate: SlotCandidate,
    ) -> Result<ConflictCheckResponse, SchedulingError> {
        let conflict = self.find_slot_conflict(&candidate).await?;
        Ok(ConflictCheckResponse {
            has_conflict: conflict.is_some(),
            conflicting_appointment: conflict,
        })
    }
}

fn validate_required(value: &str, field: &str) -> Result<(), SchedulingError> {
    if value.trim().is_empty() {
        return Err(SchedulingError::ValidationError(format!(
            "Missing required field: {}",
            field
        )));
    }
    Ok(())
}

fn apply_update(current: &Appointment, request: &UpdateAppointmentRequest) -> Appointment {
    let (technician_id, technician_name) = if request.unassign_technician {
        (None, None)
    } else {
        (
            request.technician_id.or(current.technician_id),
            request
                .technician_name
                .clone()
                .or_else(|| current.technician_name.clone()),
        )
    };

    Appointment {
        id: current.id,
        customer_id: current.customer_id,
        customer_name: request
            .customer_name
            .clone()
            .unwrap_or_else(|| current.customer_name.clone()),
        vehicle_id: current.vehicle_id,
        vehicle_info: request
            .vehicle_info
            .clone()
            .unwrap_or_else(|| current.vehicle_info.clone()),
        scheduled_date: request.scheduled_date.unwrap_or(current.scheduled_date),
        scheduled_time: request.scheduled_time.unwrap_or(current.scheduled_time),
        estimated_duration_minutes: request
            .estimated_duration_minutes
            .unwrap_or(current.estimated_duration_minutes),
        service_type: request
            .service_type
            .clone()
            .unwrap_or_else(|| current.service_type.clone()),
        status: request.status.unwrap_or(current.status),
        priority: request.priority.unwrap_or(current.priority),
        technician_id,
        technician_name,
        notes: request.notes.clone().or_else(|| current.notes.clone()),
        description: request
            .description
            .clone()
            .or_else(|| current.description.clone()),
        // Set once at creation, immutable thereafter.
        created_date: current.created_date,
    }
}
