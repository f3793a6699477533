use anyhow::{anyhow, Result};
use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    Client, Method, Response, StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use shared_config::AppConfig;

/// Thin JSON client for the shop records service. All persistence goes
/// through this boundary; the scheduling core never talks HTTP directly.
pub struct RecordsClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RecordsClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.records_base_url.clone(),
            api_key: config.records_api_key.clone(),
        }
    }

    fn get_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if !self.api_key.is_empty() {
            if let Ok(value) = HeaderValue::from_str(&self.api_key) {
                headers.insert("x-api-key", value);
            }
        }

        headers
    }

    async fn execute(&self, method: Method, path: &str, body: Option<Value>) -> Result<Response> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Making request to {}", url);

        let mut req = self.client.request(method, &url).headers(self.get_headers());

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req.send().await?;
        Ok(response)
    }

    async fn error_for_status(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Records API error ({}): {}", status, error_text);

            return Err(match status {
                StatusCode::NOT_FOUND => anyhow!("Resource not found: {}", error_text),
                StatusCode::CONFLICT => anyhow!("Conflicting record state: {}", error_text),
                _ => anyhow!("Records API error ({}): {}", status, error_text),
            });
        }

        Ok(response)
    }

    pub async fn request<T>(&self, method: Method, path: &str, body: Option<Value>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self.execute(method, path, body).await?;
        let response = self.error_for_status(response).await?;
        let data = response.json::<T>().await?;
        Ok(data)
    }

    /// Like `request`, but a 404 becomes `Ok(None)` so callers can surface
    /// their own not-found error.
    pub async fn request_optional<T>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let response = self.execute(method, path, body).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = self.error_for_status(response).await?;
        let data = response.json::<T>().await?;
        Ok(Some(data))
    }

    /// For operations whose success response carries no body (e.g. DELETE).
    /// Returns false when the resource does not exist.
    pub async fn request_no_content(&self, method: Method, path: &str) -> Result<bool> {
        let response = self.execute(method, path, None).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        self.error_for_status(response).await?;
        Ok(true)
    }
}
