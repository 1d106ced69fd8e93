pub mod api;
pub mod config;
pub mod errors;
pub mod models;
pub mod openapi;
pub mod ops;
pub mod serverless;
pub mod store;
pub mod tracker;

use std::sync::Arc;
use std::time::Instant;

use crate::config::AppConfig;
use crate::store::PositionStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PositionStore>,
    pub config: AppConfig,
    pub started_at: Instant,
}
