use crate::error::ApiError;
use reqwest::Client;
use serde_json::Value;

/// Client for the OpenWeatherMap current-weather endpoint.
///
/// The provider signals its own errors through a `cod` field inside the
/// payload; this client only discriminates transport failures, non-2xx
/// statuses and unparseable bodies, and hands the payload through
/// otherwise.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub async fn current_weather(&self, city_name: &str) -> Result<Value, ApiError> {
        let url = format!("{}/data/2.5/weather", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("q", city_name), ("appid", &self.api_key)])
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
