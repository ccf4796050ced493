//! Relay used when realtime delivery is turned off.

use async_trait::async_trait;
use tracing::trace;

use taskflow_core::events::realtime::{RealtimeEvent, RelayPayload};
use taskflow_core::result::AppResult;
use taskflow_core::traits::relay::RealtimeRelay;
use taskflow_core::types::channel::Channel;

/// Accepts and drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledRelay;

#[async_trait]
impl RealtimeRelay for DisabledRelay {
    async fn publish(
        &self,
        channel: &Channel,
        event: RealtimeEvent,
        _payload: &RelayPayload,
    ) -> AppResult<()> {
        trace!(channel = %channel, event = %event, "Realtime disabled, event dropped");
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "disabled"
    }
}
