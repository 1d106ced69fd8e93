use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::openapi;
use crate::AppState;

pub async fn spec(State(state): State<AppState>) -> Json<Value> {
    Json(openapi::document(&state.config.api_base_url))
}

pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Bitcoin Positions API — see /openapi.json for spec",
        "status": "running",
    }))
}
