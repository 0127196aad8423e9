//! Frames exchanged with the notification service.

use crate::Notification;
use serde::{Deserialize, Serialize};

/// A frame received from the server.
///
/// Only `message` is read; any other fields the server includes are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InboundMessage {
    pub message: String,
}

impl InboundMessage {
    /// Parse a text frame.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Interpret `message` as a typed notification, if it has that shape.
    pub fn notification(&self) -> Option<Notification> {
        self.message.parse().ok()
    }
}

/// A frame sent to the server. Serializes to exactly `{"message": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundMessage {
    message: String,
}

impl OutboundMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Encode as a text frame.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
