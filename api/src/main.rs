use actix_web::{web, HttpServer};
use dotenvy::dotenv;
use log::{error, info};
use std::io;

use pv_api::{create_app, AppState};
use pv_infra::create_verification_gateway;
use pv_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load environment variables
    dotenv().ok();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
            error!("Invalid configuration: {}", e);
            return Err(io::Error::new(io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    env_logger::init_from_env(
        env_logger::Env::new().default_filter_or(config.logging.level.as_str()),
    );

    info!(
        "Starting phone verification API ({} environment)",
        config.environment
    );

    let gateway = create_verification_gateway(&config.provider).map_err(|e| {
        error!("Failed to initialize verification provider: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
    })?;
    let app_state = web::Data::new(AppState::new(gateway));
    let environment = config.environment;

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(app_state.clone(), environment));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await
}
