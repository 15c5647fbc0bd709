use crate::{
    config::Config,
    error::Result,
    routes::{api_routes, openapi_route, page_guard, page_routes},
    services::{OpenWeatherClient, RequestLogger, WeatherGateway},
};
use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::{middleware::Logger, web, App, HttpServer};
use log::info;
use std::net::TcpListener;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::api_root,
        crate::handlers::health::health_check,
        crate::handlers::weather::current_weather,
    ),
    components(schemas(
        crate::models::Search,
        crate::models::TempType,
        crate::models::ErrorResponse,
    )),
    tags(
        (name = "Weather", description = "Current-weather lookups proxied to the provider"),
        (name = "System", description = "Health endpoints"),
    )
)]
pub struct ApiDoc;

pub struct Application {
    port: u16,
    host: String,
    config: Config,
}

impl Application {
    /// Create a new application instance
    pub fn new(config: &Config) -> Self {
        Self {
            port: config.port,
            host: config.host.clone(),
            config: config.clone(),
        }
    }

    /// Build and run the server
    pub async fn run(&self) -> Result<()> {
        // Always bind to 0.0.0.0 for Docker compatibility
        let bind_address = format!("0.0.0.0:{}", self.port);
        let listener = TcpListener::bind(bind_address)?;
        info!("Starting server at http://{}:{}", self.host, self.port);

        self.run_with_listener(listener).await
    }

    /// Run the server with a specific TCP listener
    /// This is useful for testing where we want to use a random port
    pub async fn run_with_listener(&self, listener: TcpListener) -> Result<()> {
        self.server(listener)?.await?;
        Ok(())
    }

    /// Build the server future without awaiting it, so tests can spawn it
    /// next to the client they drive it with
    pub fn server(&self, listener: TcpListener) -> Result<Server> {
        // Initialize services
        let logger = RequestLogger::new(&self.config.log_dir);
        let provider =
            OpenWeatherClient::new(&self.config.weather_api_base_url, &self.config.api_key);
        let gateway = web::Data::new(WeatherGateway::new(provider, logger));

        let server = HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header();

            App::new()
                .wrap(cors)
                .wrap(Logger::default())
                .app_data(gateway.clone())
                .service(api_routes())
                .service(openapi_route())
                .configure(page_routes)
                .default_service(page_guard())
        })
        .listen(listener)?
        .run();

        Ok(server)
    }
}
