use std::sync::Arc;

use axum::{routing::get, Router};

use scheduling_cell::router::scheduling_routes;
use scheduling_cell::services::scheduling::SchedulingService;
use scheduling_cell::services::store::HttpAppointmentStore;
use shared_config::AppConfig;
use technician_cell::router::technician_routes;

pub fn create_router(state: Arc<AppConfig>) -> Router {
    let store = Arc::new(HttpAppointmentStore::new(&state));
    let scheduler = Arc::new(SchedulingService::new(store));

    Router::new()
        .route("/", get(|| async { "Shop management API is running!" }))
        .nest("/appointments", scheduling_routes(scheduler))
        .nest("/technicians", technician_routes(state.clone()))
}
