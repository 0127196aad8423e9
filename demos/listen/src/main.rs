//! Listen on a notification channel and log everything that arrives.
//!
//! Run against a local server:
//!   cargo run -p notifier-listen -- --token <jwt>
//!   cargo run -p notifier-listen -- --endpoint wss://example.com/ws/notifications/ --send "Hello, it's a test message!"
//!
//! The token may also come from `NOTIFIER_TOKEN`.

use notifier_client::{
    ChannelHandler, ConnectionStage, Credential, Endpoint, InboundMessage, NotificationChannel,
};
use tracing_subscriber::EnvFilter;

const DEFAULT_ENDPOINT: &str = "ws://127.0.0.1:8000/ws/notifications/";

/// Prints each notification on its own line.
struct Printer;

impl ChannelHandler for Printer {
    fn on_message(&mut self, message: &InboundMessage) {
        match message.notification() {
            Some(n) => println!("[{}] {}", n.kind, n.text),
            None => println!("{}", message.message),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("notifier_listen=info".parse()?)
                .add_directive("notifier_client=info".parse()?),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let endpoint = parse_arg(&args, "--endpoint").unwrap_or_else(|| DEFAULT_ENDPOINT.into());
    let endpoint = Endpoint::parse(&endpoint)?;
    let token = parse_arg(&args, "--token")
        .or_else(|| std::env::var("NOTIFIER_TOKEN").ok())
        .ok_or_else(|| anyhow::anyhow!("missing --token (or NOTIFIER_TOKEN)"))?;
    let send = parse_arg(&args, "--send");

    let mut channel = NotificationChannel::open(&endpoint, &Credential::new(token), Printer)
        .ok_or_else(|| anyhow::anyhow!("websocket transport unavailable"))?;
    tracing::info!("Opening {}", channel.target());

    if channel.wait_settled().await != ConnectionStage::Open {
        anyhow::bail!("could not connect to {}", endpoint);
    }

    if let Some(text) = send {
        channel.send_message(text)?;
    }

    tokio::select! {
        _ = tokio::signal::ctrl_c() => tracing::info!("Interrupted"),
        stage = channel.wait_terminal() => tracing::info!("Channel {}", stage),
    }

    Ok(())
}

fn parse_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
