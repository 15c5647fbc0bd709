use crate::error::ApiError;
use crate::services::gateway::WeatherSource;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

/// Session-side consumer of the application's own HTTP surface.
///
/// Lets a [`crate::services::SearchStore`] run against a deployed server
/// (`GET /api/weather/{cityName}`) instead of holding the gateway in
/// process.
#[derive(Debug, Clone)]
pub struct WeatherApiClient {
    client: Client,
    base_url: String,
}

impl WeatherApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl WeatherSource for WeatherApiClient {
    async fn fetch_current(&self, city_name: &str) -> Result<Value, ApiError> {
        let url = format!("{}/api/weather/{}", self.base_url, city_name);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::ProviderUnreachable(e.to_string()))?;

        match response.status() {
            status if status.is_success() => response
                .json()
                .await
                .map_err(|e| ApiError::ProviderPayload(e.to_string())),
            status => Err(ApiError::ProviderStatus(status.as_u16())),
        }
    }
}
