// libs/scheduling-cell/src/services/conflict.rs
use tracing::{debug, warn};

use crate::models::{Appointment, SlotCandidate};

pub struct ConflictChecker;

impl ConflictChecker {
    pub fn new() -> Self {
        Self
    }

    /// First appointment for the same technician on the same date whose slot
    /// overlaps the candidate's. Unassigned candidates never conflict, and a
    /// record never conflicts with itself when `exclude_id` is set.
    pub fn find_conflict<'a>(
        &self,
        candidate: &SlotCandidate,
        existing: &'a [Appointment],
    ) -> Option<&'a Appointment> {
        let Some(technician_id) = candidate.technician_id else {
            debug!("Candidate has no technician assigned, skipping conflict check");
            return None;
        };

        let conflict = existing.iter().find(|appointment| {
            if Some(appointment.id) == candidate.exclude_id {
                return false;
            }
            if appointment.technician_id != Some(technician_id) {
                return false;
            }
            if appointment.scheduled_date != candidate.slot.date {
                return false;
            }
            // Cancelled and no-show appointments release their slot.
            if !appointment.holds_slot() {
                return false;
            }
            appointment.time_slot().overlaps(&candidate.slot)
        });

        if let Some(appointment) = conflict {
            warn!(
                "Conflict detected for technician {} on {}: overlaps appointment {}",
                technician_id, candidate.slot.date, appointment.id
            );
        }

        conflict
    }
}

impl Default for ConflictChecker {
    fn default() -> Self {
        Self::new()
    }
}
