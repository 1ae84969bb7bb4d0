use crate::rendezvous::{JoinOutcome, RoomRegistry};
use crate::signaling::SignalingOutput;
use std::sync::Arc;
use tincan_core::{PeerId, RoomName, SignalMessage};
use tracing::{debug, info, warn};

/// The room rendezvous contract: pairs two participants per room and
/// relays negotiation traffic between them.
///
/// Relays are fire-and-forget; a message for a room with no other member
/// (or for a room the registry has never seen) is silently dropped.
pub struct RendezvousService {
    registry: RoomRegistry,
    signaling: Arc<dyn SignalingOutput>,
}

impl RendezvousService {
    pub fn new(signaling: Arc<dyn SignalingOutput>) -> Self {
        Self {
            registry: RoomRegistry::new(),
            signaling,
        }
    }

    pub fn registry(&self) -> &RoomRegistry {
        &self.registry
    }

    pub async fn handle_message(&self, peer: &PeerId, msg: SignalMessage) {
        match msg {
            SignalMessage::Join { room } => self.handle_join(peer, room).await,
            SignalMessage::Ready { room } => {
                self.forward(peer, &room, SignalMessage::Ready { room: room.clone() })
                    .await;
            }
            SignalMessage::Offer { room, description } => {
                self.forward(
                    peer,
                    &room,
                    SignalMessage::Offer {
                        room: room.clone(),
                        description,
                    },
                )
                .await;
            }
            SignalMessage::Answer { room, description } => {
                self.forward(
                    peer,
                    &room,
                    SignalMessage::Answer {
                        room: room.clone(),
                        description,
                    },
                )
                .await;
            }
            SignalMessage::IceCandidate { room, candidate } => {
                self.forward(
                    peer,
                    &room,
                    SignalMessage::IceCandidate {
                        room: room.clone(),
                        candidate,
                    },
                )
                .await;
            }
            SignalMessage::Leave { room } => self.handle_leave(peer, &room).await,
            // Server-to-client vocabulary; a client echoing it back is noise.
            SignalMessage::Created | SignalMessage::Joined | SignalMessage::Full => {
                warn!("Ignoring server-only message from {}", peer);
            }
        }
    }

    /// Socket closed without an explicit leave. Equivalent to `leave` for
    /// whichever room the peer occupied.
    pub async fn handle_disconnect(&self, peer: &PeerId) {
        if let Some(room) = self.registry.room_of(peer) {
            info!("Peer {} disconnected while in room '{}'", peer, room);
            self.handle_leave(peer, &room).await;
        }
    }

    async fn handle_join(&self, peer: &PeerId, room: RoomName) {
        // Moving to another room counts as leaving the old one, with the
        // usual notification for whoever stayed behind.
        if let Some(prior) = self.registry.room_of(peer) {
            if prior != room {
                self.handle_leave(peer, &prior).await;
            }
        }

        let outcome = self.registry.join(*peer, room.clone());
        info!("Peer {} join '{}' -> {:?}", peer, room, outcome);

        let reply = match outcome {
            JoinOutcome::Created => SignalMessage::Created,
            JoinOutcome::Joined => SignalMessage::Joined,
            JoinOutcome::Full => SignalMessage::Full,
        };
        self.signaling.send(peer.clone(), reply).await;
    }

    async fn handle_leave(&self, peer: &PeerId, room: &RoomName) {
        let Some(remaining) = self.registry.leave(peer, room) else {
            return;
        };
        info!("Peer {} left '{}', notifying {}", peer, room, remaining);
        self.signaling
            .send(remaining, SignalMessage::Leave { room: room.clone() })
            .await;
    }

    /// Delivers `msg` to the other current member of `room`, never back to
    /// the sender.
    async fn forward(&self, sender: &PeerId, room: &RoomName, msg: SignalMessage) {
        let Some(other) = self.registry.other_member(room, sender) else {
            debug!("No peer to forward to in '{}', dropping", room);
            return;
        };
        self.signaling.send(other, msg).await;
    }
}
