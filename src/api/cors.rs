//! CORS configuration built on tower-http.

use axum::http::{Method, header};
use tower_http::cors::CorsLayer;

/// Permissive CORS for development: any origin, method and header.
pub fn permissive() -> CorsLayer {
    CorsLayer::permissive()
}

/// Default CORS for deployments: listed origins only, the methods this API
/// uses, common headers, credentials allowed, 1 hour preflight cache.
pub fn default(allowed_origins: &[&str]) -> CorsLayer {
    let origins: Vec<_> = allowed_origins
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}
