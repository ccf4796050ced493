//! Realtime WebSocket stream.
//!
//! Forwards relay envelopes from the caller's personal channel and the
//! requested project channels. Only available with the in-memory relay;
//! multi-node deployments subscribe to Redis directly.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Query, State, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use taskflow_core::error::AppError;
use taskflow_core::types::channel::Channel;
use taskflow_core::result::AppResult;
use taskflow_core::types::id::{ProjectId, UserId};
use taskflow_realtime::MemoryPubSub;

use crate::dto::request::RealtimeQuery;
use crate::error::ApiError;
use crate::jwt::Claims;
use crate::state::AppState;

/// Outbound frames buffered per connection.
const OUTBOUND_BUFFER: usize = 64;

/// GET /api/realtime/ws?token={jwt}&projects={id,id}
pub async fn ws_upgrade(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
    Query(query): Query<RealtimeQuery>,
) -> Result<Response, ApiError> {
    // Authenticate before upgrade
    let claims = state.jwt_decoder.decode(&query.token)?;
    let projects = query.project_ids()?;

    let pubsub = state.realtime.local_pubsub().ok_or_else(|| {
        AppError::delivery_unavailable("Realtime stream is not served by this node")
    })?;

    let channels = authorized_channels(&claims, projects)?;

    let user_id = claims.user_id();
    Ok(ws.on_upgrade(move |socket| handle_ws_connection(pubsub, user_id, channels, socket)))
}

/// The caller's personal channel plus each requested project channel.
///
/// A project channel is only opened when the token lists that project; the
/// issuer is responsible for keeping that list in step with membership.
fn authorized_channels(claims: &Claims, projects: Vec<ProjectId>) -> AppResult<Vec<Channel>> {
    let mut channels = vec![Channel::User(claims.user_id())];
    for project in projects {
        if !claims.grants_project(project) {
            return Err(AppError::forbidden(format!(
                "Token does not grant access to project {project}"
            )));
        }
        channels.push(Channel::Project(project));
    }
    Ok(channels)
}

/// Handles an established WebSocket connection.
async fn handle_ws_connection(
    pubsub: Arc<MemoryPubSub>,
    user_id: UserId,
    channels: Vec<Channel>,
    socket: WebSocket,
) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let (out_tx, mut out_rx) = mpsc::channel::<String>(OUTBOUND_BUFFER);

    let mut forwarders = Vec::with_capacity(channels.len());
    for channel in &channels {
        let mut subscription = pubsub.subscribe(channel).await;
        let out_tx = out_tx.clone();
        let channel = *channel;
        forwarders.push(tokio::spawn(async move {
            loop {
                match subscription.recv().await {
                    Ok(envelope) => match envelope.to_json() {
                        Ok(text) => {
                            if out_tx.send(text).await.is_err() {
                                break;
                            }
                        }
                        Err(e) => warn!(channel = %channel, error = %e, "Unserializable envelope"),
                    },
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(channel = %channel, skipped, "Subscriber lagged, hints dropped");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        }));
    }
    drop(out_tx);

    info!(user_id = %user_id, channels = channels.len(), "WebSocket connection established");

    let outbound_task = tokio::spawn(async move {
        while let Some(text) = out_rx.recv().await {
            if ws_tx.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    // Clients only listen; inbound frames are read to notice the close.
    while let Some(result) = ws_rx.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                debug!(user_id = %user_id, error = %e, "WebSocket error");
                break;
            }
        }
    }

    outbound_task.abort();
    for forwarder in forwarders {
        forwarder.abort();
        // Wait for the receiver to drop so its channel can be pruned.
        let _ = forwarder.await;
    }
    let pruned = pubsub.prune_idle().await;

    info!(user_id = %user_id, pruned, "WebSocket connection closed");
}
