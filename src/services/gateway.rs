use crate::error::ApiError;
use crate::services::openweather::OpenWeatherClient;
use crate::services::request_log::RequestLogger;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicI64, Ordering};

/// Anything the search store can fetch current weather from.
///
/// Implemented by [`WeatherGateway`] on the server side and by
/// [`crate::services::WeatherApiClient`] on the session side; tests swap in
/// doubles.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn fetch_current(&self, city_name: &str) -> Result<Value, ApiError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LogRequest {
    city_name: String,
    date: DateTime<Utc>,
}

/// Persisted log layout: `{ request: { cityName, date }, response }`
#[derive(Debug, Serialize)]
struct LogRecord<'a> {
    request: &'a LogRequest,
    response: Option<&'a Value>,
}

/// Fetches current weather for a city and records each lookup to the
/// request log.
///
/// Two snapshots are written per lookup under one chronological id: the
/// request alone before the provider call, then the same key again with
/// the provider payload (or the error message and code). Logging never
/// blocks or fails the lookup itself.
pub struct WeatherGateway {
    provider: OpenWeatherClient,
    logger: RequestLogger,
    last_request_id: AtomicI64,
}

impl WeatherGateway {
    pub fn new(provider: OpenWeatherClient, logger: RequestLogger) -> Self {
        Self {
            provider,
            logger,
            last_request_id: AtomicI64::new(0),
        }
    }

    /// Next chronological request id: wall-clock milliseconds, bumped past
    /// the previous id when two lookups land in the same millisecond.
    fn next_request_id(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let previous = self
            .last_request_id
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or(0);
        now.max(previous + 1)
    }
}

#[async_trait]
impl WeatherSource for WeatherGateway {
    async fn fetch_current(&self, city_name: &str) -> Result<Value, ApiError> {
        let request_id = self.next_request_id();
        let request = LogRequest {
            city_name: city_name.to_string(),
            date: Utc::now(),
        };

        // Record the request before anything can go wrong
        self.logger.log(
            request_id,
            &LogRecord {
                request: &request,
                response: None,
            },
        );

        match self.provider.current_weather(city_name).await {
            Ok(payload) => {
                self.logger.log(
                    request_id,
                    &LogRecord {
                        request: &request,
                        response: Some(&payload),
                    },
                );
                Ok(payload)
            }
            Err(err) => {
                let code = match &err {
                    ApiError::ProviderStatus(code) => *code,
                    _ => 500,
                };
                let failure = json!({ "message": err.to_string(), "code": code });
                self.logger.log(
                    request_id,
                    &LogRecord {
                        request: &request,
                        response: Some(&failure),
                    },
                );
                Err(err)
            }
        }
    }
}
