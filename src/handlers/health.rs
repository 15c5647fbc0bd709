use actix_web::{get, HttpResponse};

const HEALTH_MESSAGE: &str = "Server health okay";

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/health-check",
    tag = "System",
    responses(
        (status = 200, description = "Server is healthy", body = String),
    ),
)]
#[get("/health-check")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().body(HEALTH_MESSAGE)
}

/// Health check endpoint at the API root
#[utoipa::path(
    get,
    path = "/api",
    tag = "System",
    responses(
        (status = 200, description = "Server is healthy", body = String),
    ),
)]
pub async fn api_root() -> HttpResponse {
    HttpResponse::Ok().body(HEALTH_MESSAGE)
}
