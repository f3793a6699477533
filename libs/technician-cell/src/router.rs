// libs/technician-cell/src/router.rs
use std::sync::Arc;

use axum::{routing::get, Router};

use shared_config::AppConfig;

use crate::handlers;

pub fn technician_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(handlers::list_technicians))
        .route("/{technician_id}", get(handlers::get_technician))
        .with_state(state)
}
