use anyhow::{Context, Result};
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

const DEFAULT_PROVIDER_BASE_URL: &str = "http://api.openweathermap.org";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// OpenWeatherMap API key, the only secret the application carries.
    pub api_key: String,
    pub weather_api_base_url: String,
    pub log_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            api_key: env::var("API_KEY").context("API_KEY must be set")?,
            weather_api_base_url: env::var("WEATHER_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_PROVIDER_BASE_URL.to_string()),
            log_dir: env::var("LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./logs")),
        })
    }
}
