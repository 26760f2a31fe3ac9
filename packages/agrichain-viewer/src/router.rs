//! HTTP router setup.

use crate::handlers;
use crate::middleware::request_context;
use crate::state::AppState;
use axum::middleware;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the application router.
pub fn create(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/track", get(handlers::track))
        .route("/api/products/{product_id}", get(handlers::product))
        .route("/health", get(handlers::health))
        .route("/ready", get(handlers::ready))
        .route("/metrics", get(handlers::metrics))
        .layer(middleware::from_fn(request_context))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
