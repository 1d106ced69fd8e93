use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;

use crate::errors::AppError;
use crate::models::Position;
use crate::ops;
use crate::AppState;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Position>>, AppError> {
    let positions = ops::list_positions(state.store.as_ref()).await?;
    Ok(Json(positions))
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Position>, AppError> {
    let position = ops::get_position(state.store.as_ref(), &id).await?;
    Ok(Json(position))
}

pub async fn create(
    State(state): State<AppState>,
    body: String,
) -> Result<(StatusCode, Json<Position>), AppError> {
    let position = ops::create_position(state.store.as_ref(), &body).await?;
    Ok((StatusCode::CREATED, Json(position)))
}

pub async fn replace(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: String,
) -> Result<Json<Position>, AppError> {
    let position = ops::replace_position(state.store.as_ref(), &id, &body).await?;
    Ok(Json(position))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let body = ops::delete_position(state.store.as_ref(), &id).await?;
    Ok(Json(body))
}
