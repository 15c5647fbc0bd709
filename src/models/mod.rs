use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Re-export types from search.rs
pub use search::{Search, TempType};

mod search;

/// Error response structure
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    #[schema(example = "Weather provider returned status 500")]
    pub error: String,
}
