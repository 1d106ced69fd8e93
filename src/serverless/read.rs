use axum::http::{Method, StatusCode};

use super::{InvocationEvent, InvocationResponse};
use crate::ops;
use crate::store::PositionStore;

/// Read handler: get-by-id when the event carries an `id` path parameter,
/// full list otherwise.
pub async fn handler(event: InvocationEvent, store: &dyn PositionStore) -> InvocationResponse {
    if event.http_method == Method::OPTIONS.as_str() {
        return InvocationResponse::preflight();
    }

    match event.position_id() {
        Some(id) => match ops::get_position(store, id).await {
            Ok(position) => InvocationResponse::json(StatusCode::OK, &position),
            Err(e) => InvocationResponse::from_error(e),
        },
        None => match ops::list_positions(store).await {
            Ok(positions) => InvocationResponse::json(StatusCode::OK, &positions),
            Err(e) => InvocationResponse::from_error(e),
        },
    }
}
