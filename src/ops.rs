//! The logical operations behind the HTTP surface, written once and consumed
//! by both hosting adapters (the axum router and the per-operation
//! handlers), so the two shapes produce identical bodies and status codes.

use chrono::{SecondsFormat, Utc};
use serde_json::{json, Value};
use std::time::Instant;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Position, PositionInput};
use crate::store::PositionStore;

pub async fn list_positions(store: &dyn PositionStore) -> Result<Vec<Position>, AppError> {
    Ok(store.scan().await?)
}

pub async fn get_position(store: &dyn PositionStore, id: &str) -> Result<Position, AppError> {
    store.get(id).await?.ok_or(AppError::NotFound)
}

/// An absent or empty request body is an empty object, so both hosting
/// shapes fail it as missing fields rather than as a parse error.
fn parse_input(body: &str) -> Result<PositionInput, AppError> {
    let body = body.trim();
    if body.is_empty() {
        return Ok(PositionInput::default());
    }
    Ok(serde_json::from_str(body)?)
}

/// Create from a raw JSON body. `symbol`, `quantity`, `type` and `date` are
/// required; `entry` defaults to zero when absent.
pub async fn create_position(store: &dyn PositionStore, body: &str) -> Result<Position, AppError> {
    let input = parse_input(body)?;
    let (Some(symbol), Some(quantity), Some(side), Some(date)) =
        (input.symbol, input.quantity, input.side, input.date)
    else {
        return Err(AppError::missing_fields());
    };

    let position = Position {
        id: Uuid::new_v4().to_string(),
        symbol,
        quantity,
        side,
        entry: input.entry.unwrap_or_default(),
        date,
    };
    store.put(&position).await?;

    tracing::info!(id = %position.id, symbol = %position.symbol, "Position created");
    Ok(position)
}

/// Full replace. Every field must be present so a partial body can never
/// null out an attribute; an unknown id is a 404.
pub async fn replace_position(
    store: &dyn PositionStore,
    id: &str,
    body: &str,
) -> Result<Position, AppError> {
    let input = parse_input(body)?;
    let (Some(symbol), Some(quantity), Some(side), Some(entry), Some(date)) = (
        input.symbol,
        input.quantity,
        input.side,
        input.entry,
        input.date,
    ) else {
        return Err(AppError::missing_fields());
    };

    let position = Position {
        id: id.to_string(),
        symbol,
        quantity,
        side,
        entry,
        date,
    };
    let updated = store.update(&position).await?.ok_or(AppError::NotFound)?;

    tracing::info!(id = %updated.id, "Position replaced");
    Ok(updated)
}

/// Delete confirms the id whether or not a record existed.
pub async fn delete_position(store: &dyn PositionStore, id: &str) -> Result<Value, AppError> {
    store.delete(id).await?;
    tracing::info!(id = %id, "Position deleted");
    Ok(json!({ "deleted": id }))
}

/// Liveness probe body: always healthy, with the current timestamp and the
/// process uptime in seconds.
pub fn health_status(started_at: Instant) -> Value {
    json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        "uptime": started_at.elapsed().as_secs_f64(),
    })
}
