//! Core type definitions used across the TaskFlow workspace.

pub mod channel;
pub mod id;

pub use channel::Channel;
pub use id::*;
