use async_trait::async_trait;
use std::sync::Arc;
use tincan_core::{PeerId, SignalMessage};
use tincan_server::SignalingOutput;
use tokio::sync::{Mutex, mpsc};

/// One captured outbound signal: who it was addressed to, and what it was.
pub type Delivery = (PeerId, SignalMessage);

/// Mock SignalingOutput that captures everything the rendezvous service
/// tries to deliver.
#[derive(Clone)]
pub struct MockSignalingOutput {
    /// Channel to stream captured deliveries to the test.
    tx: mpsc::UnboundedSender<Delivery>,
    /// All captured deliveries (for after-the-fact verification).
    deliveries: Arc<Mutex<Vec<Delivery>>>,
}

impl MockSignalingOutput {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Delivery>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let signaling = Self {
            tx,
            deliveries: Arc::new(Mutex::new(Vec::new())),
        };
        (signaling, rx)
    }

    /// Everything delivered to a specific peer, in order.
    pub async fn sent_to(&self, peer_id: &PeerId) -> Vec<SignalMessage> {
        self.deliveries
            .lock()
            .await
            .iter()
            .filter(|(id, _)| id == peer_id)
            .map(|(_, msg)| msg.clone())
            .collect()
    }

    pub async fn delivery_count(&self) -> usize {
        self.deliveries.lock().await.len()
    }
}

#[async_trait]
impl SignalingOutput for MockSignalingOutput {
    async fn send(&self, peer_id: PeerId, msg: SignalMessage) {
        tracing::debug!("[MockSignaling] send to {}: {:?}", peer_id, msg);

        self.deliveries
            .lock()
            .await
            .push((peer_id.clone(), msg.clone()));
        let _ = self.tx.send((peer_id, msg));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_signaling_captures_deliveries() {
        let (signaling, mut rx) = MockSignalingOutput::new();
        let peer_id = PeerId::new();

        signaling.send(peer_id.clone(), SignalMessage::Created).await;

        let (to, msg) = rx.recv().await.unwrap();
        assert_eq!(to, peer_id);
        assert!(matches!(msg, SignalMessage::Created));

        let sent = signaling.sent_to(&peer_id).await;
        assert_eq!(sent.len(), 1);
    }
}
