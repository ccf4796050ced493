//! Shared test helpers for API integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::Value;
use tower::ServiceExt;

use taskflow_api::jwt::Claims;
use taskflow_api::{AppState, build_app};
use taskflow_core::config::{
    AppConfig, AuthConfig, DatabaseConfig, LoggingConfig, NotificationsConfig, RealtimeConfig,
    ServerConfig,
};
use taskflow_core::types::id::UserId;
use taskflow_database::{MemoryMentionStore, MemoryNotificationStore};
use taskflow_realtime::{MemoryPubSub, RealtimeHub};

pub const JWT_SECRET: &str = "integration-secret-integration-secret";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Notification rows, for direct inspection
    pub notifications: Arc<MemoryNotificationStore>,
    /// Mention rows, for direct inspection
    pub mentions: Arc<MemoryMentionStore>,
    /// Local pub/sub the relay publishes to
    pub pubsub: Arc<MemoryPubSub>,
}

/// Status and parsed JSON body of a response
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

pub fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig::default(),
        database: DatabaseConfig {
            url: "postgres://unused".to_string(),
            max_connections: 1,
            min_connections: 0,
            acquire_timeout_seconds: 1,
            idle_timeout_seconds: 1,
        },
        auth: AuthConfig {
            jwt_secret: JWT_SECRET.to_string(),
            leeway_seconds: 0,
        },
        realtime: RealtimeConfig::default(),
        notifications: NotificationsConfig::default(),
        logging: LoggingConfig::default(),
    }
}

impl TestApp {
    /// Create a new test application over in-memory stores
    pub fn new() -> Self {
        let notifications = Arc::new(MemoryNotificationStore::new());
        let mentions = Arc::new(MemoryMentionStore::new());
        let pubsub = Arc::new(MemoryPubSub::new(64));

        let state = AppState::new(
            test_config(),
            notifications.clone(),
            mentions.clone(),
            RealtimeHub::memory(pubsub.clone()),
        );

        Self {
            router: build_app(state),
            notifications,
            mentions,
            pubsub,
        }
    }

    /// Mint a valid bearer token for `user_id`
    pub fn token_for(&self, user_id: UserId, name: &str) -> String {
        encode(
            &Header::default(),
            &Claims::new(user_id, Some(name.to_string()), 3600),
            &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
        )
        .expect("Failed to sign token")
    }

    /// Send a request through the router
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}
