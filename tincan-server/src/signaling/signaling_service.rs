use crate::signaling::SignalingOutput;
use async_trait::async_trait;
use axum::extract::ws::Message;
use dashmap::DashMap;
use std::sync::Arc;
use tincan_core::{PeerId, SignalMessage};
use tokio::sync::mpsc;
use tracing::{error, warn};

/// Routes outbound signals to the per-peer WebSocket send tasks.
#[derive(Clone, Default)]
pub struct SignalingService {
    peers: Arc<DashMap<PeerId, mpsc::UnboundedSender<Message>>>,
}

impl SignalingService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_peer(&self, peer_id: PeerId, tx: mpsc::UnboundedSender<Message>) {
        self.peers.insert(peer_id, tx);
    }

    pub fn remove_peer(&self, peer_id: &PeerId) {
        self.peers.remove(peer_id);
    }
}

#[async_trait]
impl SignalingOutput for SignalingService {
    async fn send(&self, peer_id: PeerId, msg: SignalMessage) {
        let Some(peer) = self.peers.get(&peer_id) else {
            warn!("Attempted to send signal to disconnected peer {}", peer_id);
            return;
        };
        match serde_json::to_string(&msg) {
            Ok(json) => {
                if let Err(e) = peer.send(Message::Text(json.into())) {
                    error!("Failed to send WS message to {}: {:?}", peer_id, e);
                }
            }
            Err(e) => error!("Failed to serialize signal message: {}", e),
        }
    }
}
