pub mod health;
pub mod weather;

pub use health::{api_root, health_check};
pub use weather::current_weather;
