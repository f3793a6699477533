// libs/scheduling-cell/src/services/ledger.rs
use uuid::Uuid;

use crate::models::Appointment;

/// Arena for records that failed to reach the records service on create and
/// are held locally (degraded-but-available). Pending entries are merged into
/// every read snapshot; there is no automatic retry or reconciliation.
#[derive(Debug, Default)]
pub struct PendingLedger {
    entries: Vec<Appointment>,
}

impl PendingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, appointment: Appointment) {
        self.entries.push(appointment);
    }

    pub fn get(&self, id: Uuid) -> Option<&Appointment> {
        self.entries.iter().find(|a| a.id == id)
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.get(id).is_some()
    }

    /// Replace a pending record in place; pending updates stay local since
    /// the backing store never saw the create.
    pub fn replace(&mut self, updated: Appointment) -> bool {
        match self.entries.iter_mut().find(|a| a.id == updated.id) {
            Some(entry) => {
                *entry = updated;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.entries.len();
        self.entries.retain(|a| a.id != id);
        self.entries.len() != before
    }

    pub fn snapshot(&self) -> Vec<Appointment> {
        self.entries.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
