use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

/// Temperature unit a search was requested in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TempType {
    Kelvin,
    Celsius,
    Fahrenheit,
}

impl TempType {
    /// The fixed set of units a search may be recorded with
    pub fn accepted() -> &'static [TempType] {
        const ACCEPTED: [TempType; 3] = [TempType::Kelvin, TempType::Celsius, TempType::Fahrenheit];
        &ACCEPTED
    }
}

impl fmt::Display for TempType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TempType::Kelvin => write!(f, "kelvin"),
            TempType::Celsius => write!(f, "celsius"),
            TempType::Fahrenheit => write!(f, "fahrenheit"),
        }
    }
}

/// One user-initiated weather lookup: its request metadata and, once the
/// gateway call completes, the provider response.
///
/// `id`, `city_name`, `temp_type` and `date` are fixed at creation;
/// `response` stays `None` while the request is in flight. A failed request
/// is removed from the store rather than kept with an empty response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Search {
    pub id: Uuid,
    pub city_name: String,
    pub temp_type: TempType,
    pub date: DateTime<Utc>,
    #[schema(value_type = Option<Object>)]
    pub response: Option<serde_json::Value>,
}

impl Search {
    pub fn new(id: Uuid, city_name: &str, temp_type: TempType) -> Self {
        Self {
            id,
            city_name: city_name.to_string(),
            temp_type,
            date: Utc::now(),
            response: None,
        }
    }

    /// A search created but not yet resolved
    pub fn is_in_flight(&self) -> bool {
        self.response.is_none()
    }
}
