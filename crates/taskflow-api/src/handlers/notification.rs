//! Notification inbox handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use taskflow_core::types::id::NotificationId;
use taskflow_entity::notification::Notification;

use crate::dto::response::{ApiResponse, CountResponse, MarkedResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Notification>>>, ApiError> {
    let notifications = state.inbox.list_for_user(&auth).await?;
    Ok(Json(ApiResponse::ok(notifications)))
}

/// GET /api/notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<CountResponse>>, ApiError> {
    let count = state.inbox.unread_count(&auth).await?;
    Ok(Json(ApiResponse::ok(CountResponse { count })))
}

/// PUT /api/notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .inbox
        .mark_as_read(&auth, NotificationId::from_uuid(id))
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Marked as read".to_string(),
    })))
}

/// PUT /api/notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<MarkedResponse>>, ApiError> {
    let marked = state.inbox.mark_all_as_read(&auth).await?;
    Ok(Json(ApiResponse::ok(MarkedResponse { marked })))
}
