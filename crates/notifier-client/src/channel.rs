//! The notification channel and its connection task.

use crate::handler::{ChannelHandler, CloseInfo};
use crate::ChannelError;
use futures_util::{SinkExt, StreamExt};
use notifier_core::{ConnectionStage, Credential, Endpoint, InboundMessage, OutboundMessage};
use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;
use url::Url;

/// One WebSocket connection to the notification service.
///
/// The connection is started as soon as the channel is opened and lives
/// until the channel is dropped or the transport ends it. Nothing is
/// retried: once the stage is [`ConnectionStage::Closed`] or
/// [`ConnectionStage::Errored`] the channel stays there.
#[derive(Debug)]
pub struct NotificationChannel {
    /// Connection URL with the token masked.
    target: Url,
    stage: watch::Receiver<ConnectionStage>,
    outbound: mpsc::UnboundedSender<String>,
}

impl NotificationChannel {
    /// Start connecting to `endpoint`, authenticating with `credential`.
    ///
    /// Returns immediately; progress is reported through `handler`.
    /// Returns `None` without attempting a connection when there is no
    /// tokio runtime to drive the socket. A runtime built without its I/O
    /// driver cannot be detected here; the channel then settles in
    /// [`ConnectionStage::Errored`].
    pub fn open<H: ChannelHandler>(
        endpoint: &Endpoint,
        credential: &Credential,
        handler: H,
    ) -> Option<Self> {
        let Ok(runtime) = Handle::try_current() else {
            tracing::warn!(
                error = %ChannelError::UnsupportedEnvironment,
                "Notification channel not started"
            );
            return None;
        };

        let target = endpoint.redacted_target();
        let (stage_tx, stage_rx) = watch::channel(ConnectionStage::Connecting);
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();

        let conn = Connection {
            url: target.clone(),
            stage: stage_tx,
            handler,
        };
        tracing::debug!(url = %target, "Connecting");
        runtime.spawn(conn.run(endpoint.target(credential), outbound_rx));

        Some(Self {
            target,
            stage: stage_rx,
            outbound: outbound_tx,
        })
    }

    /// Current lifecycle stage.
    pub fn stage(&self) -> ConnectionStage {
        *self.stage.borrow()
    }

    /// The connection URL, token masked.
    pub fn target(&self) -> &Url {
        &self.target
    }

    /// Send `{"message": text}` to the server.
    ///
    /// Fails with [`ChannelError::SendFailure`] unless the connection is open.
    /// Success means the frame was queued, not delivered.
    pub fn send_message(&self, text: impl Into<String>) -> Result<(), ChannelError> {
        let stage = self.stage();
        if !stage.is_open() {
            return Err(ChannelError::SendFailure { stage });
        }

        let frame = OutboundMessage::new(text)
            .to_json()
            .map_err(ChannelError::Encode)?;
        self.outbound
            .send(frame)
            .map_err(|_| ChannelError::SendFailure {
                stage: self.stage(),
            })
    }

    /// Wait until the handshake either completes or fails.
    pub async fn wait_settled(&mut self) -> ConnectionStage {
        self.wait_until(|s| *s != ConnectionStage::Connecting).await
    }

    /// Wait until the connection is closed or errored.
    pub async fn wait_terminal(&mut self) -> ConnectionStage {
        self.wait_until(|s| s.is_terminal()).await
    }

    async fn wait_until(&mut self, f: impl FnMut(&ConnectionStage) -> bool) -> ConnectionStage {
        let settled = self.stage.wait_for(f).await.map(|stage| *stage);
        // Task is gone; whatever it last published is final.
        settled.unwrap_or_else(|_| *self.stage.borrow())
    }
}

/// State owned by the connection task.
struct Connection<H> {
    url: Url,
    stage: watch::Sender<ConnectionStage>,
    handler: H,
}

impl<H: ChannelHandler> Connection<H> {
    async fn run(mut self, target: Url, mut outbound: mpsc::UnboundedReceiver<String>) {
        let ws = match tokio_tungstenite::connect_async(target.as_str()).await {
            Ok((ws, response)) => {
                self.stage.send_replace(ConnectionStage::Open);
                tracing::info!(
                    url = %self.url,
                    status = %response.status(),
                    "Notification channel connected"
                );
                self.handler.on_connected();
                ws
            }
            Err(e) => return self.fail(e.into()),
        };
        let (mut sink, mut stream) = ws.split();

        loop {
            tokio::select! {
                frame = stream.next() => match frame {
                    Some(Ok(Message::Text(text))) => self.dispatch(&text),
                    Some(Ok(Message::Binary(data))) => {
                        tracing::debug!(len = data.len(), "Ignoring binary frame");
                    }
                    Some(Ok(Message::Close(frame))) => {
                        // Push out the close reply tungstenite queued.
                        if let Err(e) = sink.flush().await {
                            tracing::debug!(error = %e, "Failed to flush close reply");
                        }
                        return self.disconnected(frame);
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return self.fail(e.into()),
                    None => return self.disconnected(None),
                },

                frame = outbound.recv() => match frame {
                    Some(json) => {
                        if let Err(e) = sink.send(Message::Text(json.into())).await {
                            return self.fail(e.into());
                        }
                    }
                    // Channel dropped.
                    None => {
                        if let Err(e) = sink.close().await {
                            tracing::debug!(error = %e, "Failed to send close frame");
                        }
                        return self.disconnected(None);
                    }
                },
            }
        }
    }

    fn dispatch(&mut self, text: &str) {
        let message = match InboundMessage::from_json(text) {
            Ok(m) => m,
            Err(e) => {
                let error = ChannelError::MalformedPayload(e);
                tracing::warn!(url = %self.url, %error, "Dropping inbound frame");
                return;
            }
        };

        match message.notification() {
            Some(n) => tracing::info!(kind = %n.kind, text = %n.text, "Received notification"),
            None => tracing::info!(text = %message.message, "Received message"),
        }
        self.handler.on_message(&message);
    }

    fn disconnected(mut self, frame: Option<CloseFrame>) {
        self.stage.send_replace(ConnectionStage::Closed);
        let close = frame.map(|f| CloseInfo {
            code: u16::from(f.code),
            reason: f.reason.as_str().to_owned(),
        });
        match &close {
            Some(c) => tracing::info!(
                url = %self.url,
                code = c.code,
                reason = %c.reason,
                "Notification channel disconnected"
            ),
            None => tracing::info!(url = %self.url, "Notification channel disconnected"),
        }
        self.handler.on_disconnected(close.as_ref());
    }

    fn fail(mut self, error: ChannelError) {
        self.stage.send_replace(ConnectionStage::Errored);
        tracing::warn!(url = %self.url, %error, "Notification channel transport error");
        self.handler.on_transport_error(&error);
    }
}

/// Publishes `Errored` if the task ends any other way than `fail` or
/// `disconnected`, e.g. a panic in the handler or the transport.
impl<H> Drop for Connection<H> {
    fn drop(&mut self) {
        let ended = self.stage.send_if_modified(|stage| {
            if stage.is_terminal() {
                return false;
            }
            *stage = ConnectionStage::Errored;
            true
        });
        if ended {
            tracing::warn!(url = %self.url, "Notification channel task ended unexpectedly");
        }
    }
}
