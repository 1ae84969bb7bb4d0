use anyhow::{Context, Result};
use futures::{SinkExt, StreamExt};
use tincan_core::SignalMessage;
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{info, warn};

/// The two ends of one signaling channel: messages pushed into `tx` go to
/// the rendezvous service, messages it relays arrive on `rx`. Dropping
/// `tx` closes the socket.
pub struct SignalingPair {
    pub tx: mpsc::UnboundedSender<SignalMessage>,
    pub rx: mpsc::UnboundedReceiver<SignalMessage>,
}

pub struct SignalingChannel;

impl SignalingChannel {
    /// Opens a WebSocket to the rendezvous service and pumps it through a
    /// pair of channels, one task per direction.
    pub async fn connect(url: &str) -> Result<SignalingPair> {
        let (socket, _) = connect_async(url)
            .await
            .with_context(|| format!("Failed to connect to signaling server at {url}"))?;
        info!("Signaling channel connected: {}", url);

        let (mut sink, mut stream) = socket.split();
        let (out_tx, mut out_rx) = mpsc::unbounded_channel::<SignalMessage>();
        let (in_tx, in_rx) = mpsc::unbounded_channel::<SignalMessage>();

        tokio::spawn(async move {
            while let Some(msg) = out_rx.recv().await {
                let json = match serde_json::to_string(&msg) {
                    Ok(json) => json,
                    Err(e) => {
                        warn!("Failed to serialize signal message: {}", e);
                        continue;
                    }
                };
                if sink.send(Message::Text(json)).await.is_err() {
                    break;
                }
            }
            let _ = sink.close().await;
        });

        tokio::spawn(async move {
            while let Some(Ok(msg)) = stream.next().await {
                match msg {
                    Message::Text(text) => match serde_json::from_str::<SignalMessage>(&text) {
                        Ok(signal) => {
                            if in_tx.send(signal).is_err() {
                                break;
                            }
                        }
                        Err(e) => warn!("Invalid SignalMessage from server: {:?}", e),
                    },
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        });

        Ok(SignalingPair { tx: out_tx, rx: in_rx })
    }
}
