//! Event handler registration.

use crate::ChannelError;
use notifier_core::InboundMessage;

/// Close frame details reported by the peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseInfo {
    pub code: u16,
    pub reason: String,
}

/// Receives lifecycle events for one channel.
///
/// Every method defaults to a no-op; the channel logs each event itself
/// before calling into the handler. Calls for a given channel are made
/// one at a time from its connection task, never concurrently.
pub trait ChannelHandler: Send + 'static {
    /// The handshake completed.
    fn on_connected(&mut self) {}

    /// The transport failed. No further events follow.
    fn on_transport_error(&mut self, _error: &ChannelError) {}

    /// The connection closed. `close` is `None` when no close frame was seen.
    fn on_disconnected(&mut self, _close: Option<&CloseInfo>) {}

    /// A well-formed frame arrived.
    fn on_message(&mut self, _message: &InboundMessage) {}
}

/// Log-only handler.
impl ChannelHandler for () {}
