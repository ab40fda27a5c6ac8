//! CORS middleware configuration for the browser client.
//!
//! Outside production any origin is accepted; in production only the
//! origins listed in `CorsConfig::allowed_origins` are.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use ev_shared::{CorsConfig, Environment};

/// Creates a CORS middleware instance for the given environment.
pub fn create_cors(config: &CorsConfig, environment: Environment) -> Cors {
    if environment.is_production() && !config.allows_any_origin() {
        create_production_cors(config)
    } else {
        create_development_cors(config)
    }
}

fn base_cors(max_age: usize) -> Cors {
    Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::HeaderName::from_static("x-requested-with"),
            header::HeaderName::from_static("x-request-id"),
        ])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(max_age)
}

fn create_development_cors(config: &CorsConfig) -> Cors {
    log::info!("Configuring permissive CORS");

    let cors = base_cors(config.max_age).allow_any_origin();
    if config.allow_credentials {
        cors.supports_credentials()
    } else {
        cors
    }
}

fn create_production_cors(config: &CorsConfig) -> Cors {
    log::info!("Configuring CORS for production environment");

    let mut cors = base_cors(config.max_age);
    for origin in config.allowed_origins.iter().map(|s| s.trim()) {
        if !origin.is_empty() {
            log::info!("Adding allowed origin: {}", origin);
            cors = cors.allowed_origin(origin);
        }
    }

    if config.allow_credentials {
        cors.supports_credentials()
    } else {
        cors
    }
}
