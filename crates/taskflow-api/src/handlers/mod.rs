//! HTTP request handlers.

pub mod activity;
pub mod health;
pub mod notification;
pub mod ws;
