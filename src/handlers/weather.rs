use crate::{
    error::ApiError,
    models::ErrorResponse,
    services::{WeatherGateway, WeatherSource},
};
use actix_web::{get, web, HttpResponse};

/// Proxy a current-weather lookup for a city to the provider.
///
/// The provider payload is passed through untouched; the request and its
/// outcome are persisted to the request log as a side effect.
#[utoipa::path(
    get,
    path = "/api/weather/{city_name}",
    tag = "Weather",
    params(
        ("city_name" = String, Path, description = "City to look the weather up for"),
    ),
    responses(
        (status = 200, description = "Current weather payload from the provider"),
        (status = 400, description = "Missing city name", body = ErrorResponse),
        (status = 500, description = "Provider unreachable, failed or returned garbage", body = ErrorResponse),
    ),
)]
#[get("/weather/{city_name}")]
pub async fn current_weather(
    path: web::Path<String>,
    gateway: web::Data<WeatherGateway>,
) -> Result<HttpResponse, ApiError> {
    let city_name = path.into_inner();
    if city_name.trim().is_empty() {
        return Err(ApiError::InvalidInput("City name cannot be empty".to_string()));
    }

    let payload = gateway.fetch_current(&city_name).await?;

    Ok(HttpResponse::Ok().json(payload))
}
