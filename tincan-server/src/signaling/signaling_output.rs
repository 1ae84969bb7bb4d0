use async_trait::async_trait;
use tincan_core::{PeerId, SignalMessage};

/// Outbound half of the signaling transport. The rendezvous service only
/// ever addresses one peer at a time, so a single send is the whole seam.
#[async_trait]
pub trait SignalingOutput: Send + Sync {
    async fn send(&self, peer_id: PeerId, msg: SignalMessage);
}
