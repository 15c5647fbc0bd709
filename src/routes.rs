use actix_web::{web, HttpResponse, Scope};
use utoipa::OpenApi;

use crate::app::ApiDoc;
use crate::handlers::{api_root, current_weather, health_check};

/// Configure all routes for the API
pub fn api_routes() -> Scope {
    web::scope("/api")
        .route("", web::get().to(api_root))
        .service(health_check)
        .service(current_weather)
}

/// Configure OpenAPI documentation JSON endpoint
pub fn openapi_route() -> actix_web::Resource {
    web::resource("/api-docs/openapi.json").route(web::get().to(|| async {
        HttpResponse::Ok()
            .append_header(("Content-Type", "application/json"))
            .json(ApiDoc::openapi())
    }))
}

/// The pages the application knows about
pub fn page_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/search")
            .route(web::get().to(|| async { HttpResponse::Ok().body("Weather search") })),
    )
    .service(
        web::resource("/history")
            .route(web::get().to(|| async { HttpResponse::Ok().body("Search history") })),
    );
}

/// Force redirect to the search page if the route is unrecognised
pub fn page_guard() -> actix_web::Route {
    web::route().to(|| async {
        HttpResponse::Found()
            .append_header(("Location", "/search"))
            .finish()
    })
}
