//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use taskflow_core::config::AppConfig;
use taskflow_database::store::{MentionStore, NotificationStore};
use taskflow_realtime::RealtimeHub;
use taskflow_service::{ActivityEngine, NotificationInbox};

use crate::jwt::JwtDecoder;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Bearer token verification
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Activity notification pipeline
    pub activity_engine: Arc<ActivityEngine>,
    /// Notification inbox
    pub inbox: Arc<NotificationInbox>,
    /// Realtime relay and local subscriptions
    pub realtime: RealtimeHub,
}

impl AppState {
    /// Wires services over the given stores and relay.
    pub fn new(
        config: AppConfig,
        notifications: Arc<dyn NotificationStore>,
        mentions: Arc<dyn MentionStore>,
        realtime: RealtimeHub,
    ) -> Self {
        let activity_engine = ActivityEngine::new(
            Arc::clone(&notifications),
            mentions,
            realtime.relay(),
            config.notifications.clone(),
        );

        Self {
            jwt_decoder: Arc::new(JwtDecoder::new(&config.auth)),
            activity_engine: Arc::new(activity_engine),
            inbox: Arc::new(NotificationInbox::new(notifications)),
            realtime,
            config: Arc::new(config),
        }
    }
}
