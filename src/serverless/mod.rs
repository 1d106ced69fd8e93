//! Per-operation hosting shape: each handler is stateless, dispatches on the
//! invocation event, and attaches the permissive CORS header set itself
//! because no shared layer exists in this shape. All bodies and status codes
//! come from `ops`, so they match the always-on adapter byte for byte.

pub mod crud;
pub mod health;
pub mod openapi;
pub mod read;

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::api::cors::cors_headers;
use crate::errors::AppError;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvocationEvent {
    pub http_method: String,
    pub path_parameters: Option<PathParameters>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathParameters {
    pub id: Option<String>,
}

impl InvocationEvent {
    pub fn position_id(&self) -> Option<&str> {
        self.path_parameters.as_ref()?.id.as_deref()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl InvocationResponse {
    /// Serializes the body exactly as the axum adapter does, so the two
    /// hosting shapes stay byte-identical.
    pub fn json<T: Serialize>(status: StatusCode, body: &T) -> Self {
        match serde_json::to_string(body) {
            Ok(body) => Self::raw(status, body),
            Err(e) => Self::from_error(AppError::from(e)),
        }
    }

    fn raw(status: StatusCode, body: String) -> Self {
        let mut headers: BTreeMap<String, String> = cors_headers()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        headers.insert("Content-Type".into(), "application/json".into());

        Self {
            status_code: status.as_u16(),
            headers,
            body,
        }
    }

    /// Preflight answer: 200, CORS headers, no body.
    pub fn preflight() -> Self {
        let headers = cors_headers()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self {
            status_code: StatusCode::OK.as_u16(),
            headers,
            body: String::new(),
        }
    }

    pub fn from_error(error: AppError) -> Self {
        let (status, body) = error.to_body();
        Self::raw(status, body.to_string())
    }
}
