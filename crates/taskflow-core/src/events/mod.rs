//! Event types carried by the realtime relay.

pub mod realtime;

pub use realtime::{RealtimeEvent, RelayPayload};
