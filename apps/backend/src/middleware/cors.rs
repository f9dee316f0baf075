use actix_cors::Cors;
use actix_web::http::header;

use crate::middleware::request_log::REQUEST_ID_HEADER;

/// Explicit-origin CORS for the browser client.
///
/// `allowed_origins` comes from `CORS_ALLOWED_ORIGINS`; when empty only the
/// local dev frontends are allowed.
pub fn cors_middleware(allowed_origins: &[String]) -> Cors {
    let defaults = [
        "http://localhost:3000".to_string(),
        "http://127.0.0.1:3000".to_string(),
    ];
    let origins: &[String] = if allowed_origins.is_empty() {
        &defaults
    } else {
        allowed_origins
    };

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers(vec![header::HeaderName::from_static(REQUEST_ID_HEADER)])
        .max_age(3600);

    for origin in origins {
        cors = cors.allowed_origin(origin);
    }
    cors
}
