//! # taskflow-api
//!
//! HTTP API layer for TaskFlow notifications built on Axum.
//!
//! Provides the inbox endpoints, the activity ingestion endpoint used by
//! task and chat mutation handlers, the realtime WebSocket stream, JWT
//! bearer authentication, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod jwt;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::ApiError;
pub use state::AppState;
