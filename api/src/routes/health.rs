use actix_web::HttpResponse;
use chrono::Utc;

use pv_shared::types::{HealthResponse, HealthStatus};

/// Service name reported by the health check
pub const SERVICE_NAME: &str = "phone-verify-api";

/// Health check endpoint handler
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: HealthStatus::Healthy,
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    })
}
