use notifier_core::ConnectionStage;
use tokio_tungstenite::tungstenite;

/// Everything that can go wrong on a notification channel.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    /// No async runtime to drive the socket.
    #[error("websocket transport is not available in this environment")]
    UnsupportedEnvironment,
    #[error("transport error: {0}")]
    Transport(#[from] tungstenite::Error),
    /// An inbound frame that is not `{"message": <string>, ...}`.
    #[error("malformed payload: {0}")]
    MalformedPayload(#[source] serde_json::Error),
    #[error("cannot send while connection is {stage}")]
    SendFailure { stage: ConnectionStage },
    #[error("failed to encode outbound message: {0}")]
    Encode(#[source] serde_json::Error),
}
