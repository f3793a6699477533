pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::*;
pub use services::calendar::{CalendarView, DayBucket, HourBucket};
pub use services::conflict::ConflictChecker;
pub use services::lifecycle::AppointmentLifecycleService;
pub use services::scheduling::SchedulingService;
pub use services::store::{AppointmentStore, HttpAppointmentStore, InMemoryAppointmentStore};
