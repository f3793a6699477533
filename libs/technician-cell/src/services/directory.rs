// libs/technician-cell/src/services/directory.rs
use anyhow::Result;
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_store::{Method, RecordsClient};

use crate::models::Technician;

pub struct TechnicianDirectoryService {
    records: RecordsClient,
}

impl TechnicianDirectoryService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            records: RecordsClient::new(config),
        }
    }

    pub async fn list_technicians(&self, active_only: bool) -> Result<Vec<Technician>> {
        debug!("Listing technicians (active_only={})", active_only);

        let path = if active_only {
            "/api/v1/technicians?active=true"
        } else {
            "/api/v1/technicians"
        };

        self.records.request(Method::GET, path, None).await
    }

    pub async fn get_technician(&self, technician_id: Uuid) -> Result<Option<Technician>> {
        self.records
            .request_optional(
                Method::GET,
                &format!("/api/v1/technicians/{}", technician_id),
                None,
            )
            .await
    }
}
