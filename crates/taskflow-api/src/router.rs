//! Route definitions for the TaskFlow notification API.
//!
//! All routes are mounted under `/api`.

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::handlers;
use crate::state::AppState;

/// Build the Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(notification_routes())
        .merge(activity_routes())
        .merge(realtime_routes())
        .merge(health_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Inbox endpoints
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notifications",
            get(handlers::notification::list_notifications),
        )
        .route(
            "/notifications/unread-count",
            get(handlers::notification::unread_count),
        )
        .route(
            "/notifications/read-all",
            put(handlers::notification::mark_all_read),
        )
        .route(
            "/notifications/{id}/read",
            put(handlers::notification::mark_read),
        )
}

/// Activity ingestion from task/chat mutation handlers
fn activity_routes() -> Router<AppState> {
    Router::new().route("/activities", post(handlers::activity::record_activity))
}

/// WebSocket stream
fn realtime_routes() -> Router<AppState> {
    Router::new().route("/realtime/ws", get(handlers::ws::ws_upgrade))
}

/// Health (no auth)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
