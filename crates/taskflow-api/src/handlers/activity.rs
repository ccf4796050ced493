//! Activity ingestion handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use validator::Validate;

use taskflow_core::error::AppError;
use taskflow_service::{ActivityOutcome, ActivityRequest};

use crate::dto::request::RecordActivityRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/activities
///
/// Runs the notification pipeline for an action the caller has already
/// committed. Relay outages never fail this request.
pub async fn record_activity(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<RecordActivityRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ActivityOutcome>>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(format!("Invalid activity: {e}")))?;

    let (context, membership) = req.into_parts(auth.user_id)?;
    let outcome = state
        .activity_engine
        .process(&ActivityRequest {
            context,
            membership,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(outcome))))
}
