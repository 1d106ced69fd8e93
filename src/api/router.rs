use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use super::cors::cors_layer;
use super::handlers;
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::docs::root))
        .route("/health", get(handlers::health::health_check))
        .route("/openapi.json", get(handlers::docs::spec))
        .route(
            "/positions",
            get(handlers::positions::list).post(handlers::positions::create),
        )
        .route(
            "/positions/:id",
            get(handlers::positions::detail)
                .put(handlers::positions::replace)
                .delete(handlers::positions::remove),
        )
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
