//! Application builder: wires router, middleware, and state into an Axum app.

use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::middleware as axum_middleware;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use taskflow_core::config::ServerConfig;

use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let server: &ServerConfig = &state.config.server;
    let timeout = request_timeout(server);
    let cors = build_cors_layer(server);

    build_router(state)
        .layer(axum_middleware::from_fn(request_logging))
        .layer(timeout)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Requests still running after `request_timeout_seconds` answer 408.
fn request_timeout(server: &ServerConfig) -> TimeoutLayer {
    TimeoutLayer::with_status_code(
        StatusCode::REQUEST_TIMEOUT,
        Duration::from_secs(server.request_timeout_seconds),
    )
}
