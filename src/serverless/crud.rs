use axum::http::{Method, StatusCode};
use serde_json::json;

use super::{InvocationEvent, InvocationResponse};
use crate::ops;
use crate::store::PositionStore;

/// Write handler: POST creates, PUT replaces, DELETE removes. Anything else
/// is a 405.
pub async fn handler(event: InvocationEvent, store: &dyn PositionStore) -> InvocationResponse {
    let body = event.body.as_deref().unwrap_or("");
    let method = event.http_method.as_str();

    if method == Method::OPTIONS.as_str() {
        return InvocationResponse::preflight();
    }

    if method == Method::POST.as_str() {
        return match ops::create_position(store, body).await {
            Ok(position) => InvocationResponse::json(StatusCode::CREATED, &position),
            Err(e) => InvocationResponse::from_error(e),
        };
    }

    if method == Method::PUT.as_str() {
        if let Some(id) = event.position_id() {
            return match ops::replace_position(store, id, body).await {
                Ok(position) => InvocationResponse::json(StatusCode::OK, &position),
                Err(e) => InvocationResponse::from_error(e),
            };
        }
    }

    if method == Method::DELETE.as_str() {
        if let Some(id) = event.position_id() {
            return match ops::delete_position(store, id).await {
                Ok(body) => InvocationResponse::json(StatusCode::OK, &body),
                Err(e) => InvocationResponse::from_error(e),
            };
        }
    }

    InvocationResponse::json(
        StatusCode::METHOD_NOT_ALLOWED,
        &json!({ "error": "Method not allowed" }),
    )
}
