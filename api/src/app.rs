//! Application factory
//!
//! Builds the Actix-web application around the shared [`AppState`].

use actix_web::{middleware::Logger, web, App, HttpResponse};

use pv_shared::config::Environment;
use pv_shared::types::ApiErrorBody;

use crate::handlers::json_error_handler;
use crate::middleware::cors::create_cors;
use crate::routes::health::health_check;
use crate::routes::verification::{check_verification, start_verification, AppState};

/// Create and configure the application with all dependencies
pub fn create_app(
    app_state: web::Data<AppState>,
    environment: Environment,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(app_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(create_cors(environment))
        .wrap(Logger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api")
                .route("/start-verification", web::post().to(start_verification))
                .route("/check-verification", web::post().to(check_verification)),
        )
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiErrorBody::new("Not found").with_code(Some("not_found".to_string())))
}
