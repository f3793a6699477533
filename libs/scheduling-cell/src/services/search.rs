// libs/scheduling-cell/src/services/search.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Appointment, AppointmentStatus};

/// Filter predicates are AND-ed; a `None` predicate is skipped entirely.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentFilter {
    pub status: Option<AppointmentStatus>,
    pub technician_id: Option<Uuid>,
    pub query: Option<String>,
}

/// Pure, side-effect-free matcher shared by the calendar and grid views.
/// Safe to recompute on every keystroke.
pub struct SearchFilterEngine;

impl SearchFilterEngine {
    pub fn new() -> Self {
        Self
    }

    /// Case-insensitive substring match over the appointment's display
    /// fields. An empty or whitespace-only query matches everything.
    pub fn matches(&self, appointment: &Appointment, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        let haystacks = [
            Some(appointment.customer_name.as_str()),
            Some(appointment.vehicle_info.as_str()),
            Some(appointment.service_type.as_str()),
            appointment.technician_name.as_deref(),
            appointment.notes.as_deref(),
            appointment.description.as_deref(),
        ];

        haystacks
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    /// Input order is preserved, so re-applying the same filter is a no-op.
    pub fn filter(&self, appointments: &[Appointment], filter: &AppointmentFilter) -> Vec<Appointment> {
        appointments
            .iter()
            .filter(|appointment| {
                if let Some(status) = filter.status {
                    if appointment.status != status {
                        return false;
                    }
                }
                if let Some(technician_id) = filter.technician_id {
                    if appointment.technician_id != Some(technician_id) {
                        return false;
                    }
                }
                if let Some(query) = &filter.query {
                    if !self.matches(appointment, query) {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect()
    }
}

impl Default for SearchFilterEngine {
    fn default() -> Self {
        Self::new()
    }
}
