//! # taskflow-core
//!
//! Core crate for the TaskFlow activity notification engine. Contains the
//! unified error system, configuration schemas, typed identifiers, realtime
//! channel naming, relay event types, and the [`traits::RealtimeRelay`]
//! capability implemented by `taskflow-realtime`.
//!
//! This crate has **no** internal dependencies on other TaskFlow crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
