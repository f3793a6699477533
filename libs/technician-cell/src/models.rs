// libs/technician-cell/src/models.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Shop technician, consumed read-only for display names and the technician
/// filter dropdown. Assignment lives on the appointment record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Technician {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
    pub active: bool,
}

#[derive(Debug, Deserialize)]
pub struct TechnicianQueryParams {
    pub active_only: Option<bool>,
}
