use axum::http::StatusCode;
use std::time::Instant;

use super::InvocationResponse;
use crate::ops;

/// Health handler. `started_at` is the cold-start instant of the hosting
/// process, so uptime counts from handler initialization.
pub async fn handler(started_at: Instant) -> InvocationResponse {
    InvocationResponse::json(StatusCode::OK, &ops::health_status(started_at))
}
