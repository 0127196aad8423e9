//! Client side of the notification channel.
//!
//! A [`NotificationChannel`] owns exactly one WebSocket connection. It
//! connects eagerly, logs every lifecycle event, hands well-formed frames to
//! a [`ChannelHandler`], and offers a single outbound operation,
//! [`NotificationChannel::send_message`].
//!
//! ```ignore
//! let endpoint = Endpoint::parse("ws://127.0.0.1:8000/ws/notifications/")?;
//! let channel = NotificationChannel::open(&endpoint, &Credential::new(token), ());
//! ```

mod channel;
mod error;
mod handler;

pub use channel::NotificationChannel;
pub use error::ChannelError;
pub use handler::{ChannelHandler, CloseInfo};

pub use notifier_core::{
    ConnectionStage, Credential, Endpoint, EndpointError, InboundMessage, Notification,
    NotificationKind, NotificationParseError, OutboundMessage,
};
