//! Core types for the notification channel.
//!
//! This crate holds everything that does not touch the network: the JSON
//! frames exchanged with the notification service, the endpoint and
//! credential that make up the connection target, and the lifecycle stage
//! a connection can be in.

mod endpoint;
mod message;
mod notification;

pub use endpoint::{Credential, Endpoint, EndpointError};
pub use message::{InboundMessage, OutboundMessage};
pub use notification::{Notification, NotificationKind, NotificationParseError};

use std::fmt;

/// Connection lifecycle stage.
///
/// Transitions are `Connecting -> Open -> {Closed | Errored}`, or straight
/// from `Connecting` to `Errored` when the handshake fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStage {
    /// Handshake in progress.
    Connecting,
    /// Handshake completed, frames can flow.
    Open,
    /// Closed by either peer or by the network.
    Closed,
    /// Transport failure. Terminal.
    Errored,
}

impl ConnectionStage {
    /// Whether outbound frames may be written.
    pub fn is_open(self) -> bool {
        self == Self::Open
    }

    /// Whether the connection has reached a stage it never leaves.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Closed | Self::Errored)
    }
}

impl fmt::Display for ConnectionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Connecting => "connecting",
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Errored => "errored",
        };
        f.write_str(s)
    }
}
