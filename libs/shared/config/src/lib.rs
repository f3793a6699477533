use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub records_base_url: String,
    pub records_api_key: String,
    pub listen_port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            records_base_url: env::var("RECORDS_BASE_URL")
                .unwrap_or_else(|_| {
                    warn!("RECORDS_BASE_URL not set, using empty value");
                    String::new()
                }),
            records_api_key: env::var("RECORDS_API_KEY")
                .unwrap_or_else(|_| {
                    warn!("RECORDS_API_KEY not set, using empty value");
                    String::new()
                }),
            listen_port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.records_base_url.is_empty()
    }
}
