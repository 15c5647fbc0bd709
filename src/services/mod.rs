pub mod api_client;
pub mod gateway;
pub mod openweather;
pub mod request_log;
pub mod search_store;

// Re-export public types
pub use api_client::WeatherApiClient;
pub use gateway::{WeatherGateway, WeatherSource};
pub use openweather::OpenWeatherClient;
pub use request_log::RequestLogger;
pub use search_store::{SearchStore, RECENT_SEARCH_LIMIT};
