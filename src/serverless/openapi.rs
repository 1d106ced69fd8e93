use axum::http::StatusCode;

use super::InvocationResponse;
use crate::openapi;

pub async fn handler(base_url: &str) -> InvocationResponse {
    InvocationResponse::json(StatusCode::OK, &openapi::document(base_url))
}
