//! Core traits defined in `taskflow-core` and implemented by other crates.

pub mod relay;

pub use relay::RealtimeRelay;
