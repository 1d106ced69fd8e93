//! Permissive CORS policy, defined once. The always-on adapter applies it as
//! a tower layer; the per-operation adapter copies the same header set onto
//! every response it builds.

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, Method};
use tower_http::cors::{Any, CorsLayer};

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_HEADERS: &str = "Content-Type,x-api-key";
pub const ALLOW_METHODS: &str = "GET,POST,PUT,DELETE,OPTIONS";

pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, HeaderName::from_static("x-api-key")])
}

/// Header pairs for responses built outside the tower stack.
pub fn cors_headers() -> [(&'static str, &'static str); 3] {
    [
        ("Access-Control-Allow-Origin", ALLOW_ORIGIN),
        ("Access-Control-Allow-Headers", ALLOW_HEADERS),
        ("Access-Control-Allow-Methods", ALLOW_METHODS),
    ]
}
