//! Realtime relay capability.

use async_trait::async_trait;

use crate::events::realtime::{RealtimeEvent, RelayPayload};
use crate::result::AppResult;
use crate::types::channel::Channel;

/// Best-effort publish of a realtime hint to a channel.
///
/// Implementations report transport failures as
/// [`ErrorKind::DeliveryUnavailable`](crate::error::ErrorKind::DeliveryUnavailable);
/// callers treat every error as non-fatal. No retry, queue, or ordering is
/// implied.
#[async_trait]
pub trait RealtimeRelay: Send + Sync + std::fmt::Debug + 'static {
    /// Publish one event to one channel.
    async fn publish(
        &self,
        channel: &Channel,
        event: RealtimeEvent,
        payload: &RelayPayload,
    ) -> AppResult<()>;

    /// Short backend name used in logs.
    fn backend_name(&self) -> &'static str;
}
