mod artifacts;
mod config;
mod error;
mod inference;
mod routes;

use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use shared::FIELD_SPECS;

use crate::artifacts::classifier::LogisticModel;
use crate::artifacts::scaler::StandardScaler;
use crate::config::AppConfig;
use crate::error::ConfigError;
use crate::inference::InferenceService;
use crate::routes::configure_routes;

fn load_service(config: &AppConfig) -> Result<InferenceService, ConfigError> {
    let scaler = StandardScaler::load(&config.scaler_path)?;
    log::info!("Loaded scaler artifact from {}", config.scaler_path);

    let classifier = LogisticModel::load(&config.model_path)?;
    log::info!("Loaded classifier artifact from {}", config.model_path);

    let limits = match &config.limits_path {
        Some(path) => {
            let limits = config::load_limits(path)?;
            log::info!("Loaded validation limits from {}", path);
            limits
        }
        None => FIELD_SPECS,
    };

    Ok(InferenceService::with_limits(
        Box::new(scaler),
        Box::new(classifier),
        limits,
    ))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    dotenv::dotenv().ok();

    let config = AppConfig::from_env();

    // Artifacts load once, before the listener binds. A broken deployment
    // fails here instead of on the first request.
    let service = match load_service(&config) {
        Ok(service) => web::Data::new(service),
        Err(e) => {
            log::error!("Failed to initialize inference service: {e}");
            return Err(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Service initialization failed: {e}"),
            ));
        }
    };

    let bind_address = config.bind_address();
    log::info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                    .allowed_headers(vec![
                        actix_web::http::header::ACCEPT,
                        actix_web::http::header::CONTENT_TYPE,
                    ])
                    .max_age(3600),
            )
            .app_data(service.clone())
            .configure(configure_routes)
    })
    .bind(&bind_address)?
    .run()
    .await
}
