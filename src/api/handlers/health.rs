use axum::extract::State;
use axum::Json;
use serde_json::Value;

use crate::ops;
use crate::AppState;

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(ops::health_status(state.started_at))
}
