//! CORS middleware configuration for cross-origin requests.
//!
//! The verification endpoints are called from browser and mobile clients.
//! Development accepts any origin; production only accepts the origins
//! listed in `ALLOWED_ORIGINS` plus local app shells.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use std::env;

use pv_shared::config::Environment;

const DEFAULT_MAX_AGE: usize = 3600;

/// Origins used by packaged mobile shells talking to the API
const APP_SHELL_ORIGINS: [&str; 3] = [
    "capacitor://localhost",
    "http://localhost",
    "https://localhost",
];

/// Creates a CORS middleware instance configured for the current environment.
///
/// # Environment Variables
/// - `ALLOWED_ORIGINS`: Comma-separated list of allowed origins (production only)
/// - `CORS_MAX_AGE`: Max age for preflight cache (default: 3600 seconds)
pub fn create_cors(environment: Environment) -> Cors {
    let max_age = env::var("CORS_MAX_AGE")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(DEFAULT_MAX_AGE);

    if environment.is_production() {
        let origins = env::var("ALLOWED_ORIGINS").unwrap_or_default();
        create_production_cors(&parse_origins(&origins), max_age)
    } else {
        create_development_cors(max_age)
    }
}

fn create_development_cors(max_age: usize) -> Cors {
    log::info!("Configuring CORS for development environment");

    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .max_age(max_age)
}

fn create_production_cors(origins: &[String], max_age: usize) -> Cors {
    log::info!("Configuring CORS for production environment");

    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .max_age(max_age);

    for origin in origins {
        log::info!("Adding allowed origin: {}", origin);
        cors = cors.allowed_origin(origin);
    }
    for origin in APP_SHELL_ORIGINS {
        cors = cors.allowed_origin(origin);
    }

    cors
}

/// Split a comma-separated origin list, dropping blanks
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_skips_blanks() {
        let origins = parse_origins("https://app.example.com, ,https://admin.example.com,");
        assert_eq!(
            origins,
            vec![
                "https://app.example.com".to_string(),
                "https://admin.example.com".to_string()
            ]
        );
    }

    #[test]
    fn test_parse_origins_empty() {
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn test_create_cors_for_each_environment() {
        let _development = create_cors(Environment::Development);
        let _production = create_cors(Environment::Production);
    }
}
