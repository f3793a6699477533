// libs/scheduling-cell/src/models.rs
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

pub const MIN_DURATION_MINUTES: i64 = 15;
pub const MAX_DURATION_MINUTES: i64 = 480;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub customer_name: String,
    pub vehicle_id: Uuid,
    pub vehicle_info: String,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: NaiveTime,
    pub estimated_duration_minutes: i64,
    pub service_type: String,
    pub status: AppointmentStatus,
    pub priority: AppointmentPriority,
    pub technician_id: Option<Uuid>,
    pub technician_name: Option<String>,
    pub notes: Option<String>,
    pub description: Option<String>,
    pub created_date: DateTime<Utc>,
}

impl Appointment {
    /// The interval this appointment occupies on the calendar.
    pub fn time_slot(&self) -> TimeSlot {
        TimeSlot {
            date: self.scheduled_date,
            start_time: self.scheduled_time,
            duration_minutes: self.estimated_duration_minutes,
        }
    }

    /// Whether this appointment still holds its technician slot. Cancelled
    /// and no-show appointments release the slot; completed work occupied it.
    pub fn holds_slot(&self) -> bool {
        !matches!(
            self.status,
            AppointmentStatus::Cancelled | AppointmentStatus::NoShow
        )
    }
}

/// A (date, time-of-day, duration) interval. Comparisons are date+time
/// lexicographic in the shop's local time reference; no timezone arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_minutes: i64,
}

impl TimeSlot {
    pub fn new(
        date: NaiveDate,
        start_time: NaiveTime,
        duration_minutes: i64,
    ) -> Result<Self, SchedulingError> {
        if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&duration_minutes) {
            return Err(SchedulingError::ValidationError(format!(
                "Estimated duration must be between {} and {} minutes, got {}",
                MIN_DURATION_MINUTES, MAX_DURATION_MINUTES, duration_minutes
            )));
        }

        Ok(Self {
            date,
            start_time,
            duration_minutes,
        })
    }

    /// The one place date/time strings are parsed. Malformed input is a typed
    /// failure, never a silent fallback to a default slot.
    pub fn parse(
        date: &str,
        time: &str,
        duration_minutes: i64,
    ) -> Result<Self, SchedulingError> {
        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .map_err(|e| SchedulingError::InvalidTime(format!("Malformed date '{}': {}", date, e)))?;

        let time = time.trim();
        let start_time = NaiveTime::parse_from_str(time, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M:%S"))
            .map_err(|e| SchedulingError::InvalidTime(format!("Malformed time '{}': {}", time, e)))?;

        Self::new(date, start_time, duration_minutes)
    }

    pub fn start(&self) -> NaiveDateTime {
        self.date.and_time(self.start_time)
    }

    pub fn end(&self) -> NaiveDateTime {
        self.start() + Duration::minutes(self.duration_minutes)
    }

    /// Half-open interval overlap: touching boundaries do not overlap.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start() < other.end() && other.start() < self.end()
    }

    /// 12-hour form for display; storage stays 24-hour.
    pub fn display_time(&self) -> String {
        self.start_time.format("%-I:%M %p").to_string()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::Completed | AppointmentStatus::Cancelled | AppointmentStatus::NoShow
        )
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Scheduled => write!(f, "scheduled"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::InProgress => write!(f, "in-progress"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
            AppointmentStatus::NoShow => write!(f, "no-show"),
        }
    }
}

/// Independent of status; used for visual emphasis and as the tie-breaker
/// when ordering list views, never for scheduling itself.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl AppointmentPriority {
    pub fn weight(&self) -> u8 {
        match self {
            AppointmentPriority::Low => 0,
            AppointmentPriority::Medium => 1,
            AppointmentPriority::High => 2,
            AppointmentPriority::Urgent => 3,
        }
    }
}

impl fmt::Display for AppointmentPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentPriority::Low => write!(f, "low"),
            AppointmentPriority::Medium => write!(f, "medium"),
            AppointmentPriority::High => write!(f, "high"),
            AppointmentPriority::Urgent => write!(f, "urgent"),
        }
    }
}

/// Whether a record has been confirmed by the records service or is only
/// held locally after a transport failure on create.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RecordState {
    Pending,
    Committed,
}

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub customer_id: Uuid,
    pub customer_name: String,
    pub vehicle_id: Uuid,
    pub vehicle_info: String,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: NaiveTime,
    pub estimated_duration_minutes: i64,
    pub service_type: String,
    pub priority: Option<AppointmentPriority>,
    pub technician_id: Option<Uuid>,
    pub technician_name: Option<String>,
    pub notes: Option<String>,
    pub description: Option<String>,
    /// Books the slot even when a technician conflict is detected.
    #[serde(default)]
    pub override_conflict: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAppointmentRequest {
    pub customer_name: Option<String>,
    pub vehicle_info: Option<String>,
    pub scheduled_date: Option<NaiveDate>,
    pub scheduled_time: Option<NaiveTime>,
    pub estimated_duration_minutes: Option<i64>,
    pub service_type: Option<String>,
    pub status: Option<AppointmentStatus>,
    pub priority: Option<AppointmentPriority>,
    pub technician_id: Option<Uuid>,
    pub technician_name: Option<String>,
    pub notes: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub unassign_technician: bool,
    #[serde(default)]
    pub override_conflict: bool,
    /// Bypasses the status transition table (manual correction path).
    #[serde(default)]
    pub force_status: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: AppointmentStatus,
    #[serde(default)]
    pub force: bool,
}

/// Client-side search/filter parameters; any `None` predicate is skipped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentQuery {
    pub status: Option<AppointmentStatus>,
    pub technician_id: Option<Uuid>,
    pub q: Option<String>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotCandidate {
    pub technician_id: Option<Uuid>,
    pub slot: TimeSlot,
    /// Set when re-checking an update so the record does not conflict with itself.
    pub exclude_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictCheckResponse {
    pub has_conflict: bool,
    pub conflicting_appointment: Option<Appointment>,
}

/// Outcome of a create: the stored record plus whether it actually reached
/// the records service or is a local pending fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentOutcome {
    pub appointment: Appointment,
    pub record_state: RecordState,
}

/// Everything the store needs to mint a new appointment; ids come back from
/// the store, never from the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentDraft {
    pub customer_id: Uuid,
    pub customer_name: String,
    pub vehicle_id: Uuid,
    pub vehicle_info: String,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: NaiveTime,
    pub estimated_duration_minutes: i64,
    pub service_type: String,
    pub status: AppointmentStatus,
    pub priority: AppointmentPriority,
    pub technician_id: Option<Uuid>,
    pub technician_name: Option<String>,
    pub notes: Option<String>,
    pub description: Option<String>,
    pub created_date: DateTime<Utc>,
}

impl AppointmentDraft {
    pub fn into_appointment(self, id: Uuid) -> Appointment {
        Appointment {
            id,
            customer_id: self.customer_id,
            customer_name: self.customer_name,
            vehicle_id: self.vehicle_id,
            vehicle_info: self.vehicle_info,
            scheduled_date: self.scheduled_date,
            scheduled_time: self.scheduled_time,
            estimated_duration_minutes: self.estimated_duration_minutes,
            service_type: self.service_type,
            status: self.status,
            priority: self.priority,
            technician_id: self.technician_id,
            technician_name: self.technician_name,
            notes: self.notes,
            description: self.description,
            created_date: self.created_date,
        }
    }
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum SchedulingError {
    #[error("Appointment not found")]
    NotFound,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid date or time: {0}")]
    InvalidTime(String),

    #[error("Appointment conflicts with existing booking {conflicting_id}")]
    ConflictDetected { conflicting_id: Uuid },

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidStatusTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    #[error("Records store error: {0}")]
    StoreError(String),
}
