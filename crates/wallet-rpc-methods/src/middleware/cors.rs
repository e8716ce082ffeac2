//! CORS layer for the JSON-RPC server.
//!
//! Wrapper around tower-http CORS with wallet configuration.

use crate::domain::config::CorsConfig;
use axum::http::{HeaderName, HeaderValue, Method};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

/// Create CORS layer from config
pub fn create_cors_layer(config: &CorsConfig) -> CorsLayer {
    if !config.enabled {
        return CorsLayer::very_permissive();
    }

    let mut cors = CorsLayer::new();

    if config.allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    let methods: Vec<Method> = config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);

    if config.allowed_headers.iter().any(|h| h == "*") {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<HeaderName> = config
            .allowed_headers
            .iter()
            .filter_map(|h| h.parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors.max_age(Duration::from_secs(config.max_age))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The layer is opaque, so these only check that construction succeeds.
    #[test]
    fn test_default_cors_config() {
        let config = CorsConfig::default();
        let _layer = create_cors_layer(&config);
    }

    #[test]
    fn test_explicit_origins() {
        let config = CorsConfig {
            allowed_origins: vec!["https://dapp.example".into(), "not a header\n".into()],
            allowed_headers: vec!["*".into()],
            ..Default::default()
        };
        let _layer = create_cors_layer(&config);
    }

    #[test]
    fn test_disabled_cors() {
        let config = CorsConfig {
            enabled: false,
            ..Default::default()
        };
        let _layer = create_cors_layer(&config);
    }
}
