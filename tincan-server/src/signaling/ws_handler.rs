use crate::rendezvous::RendezvousService;
use crate::signaling::SignalingService;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tincan_core::{PeerId, SignalMessage};
use tokio::sync::mpsc;
use tracing::{info, warn};

#[derive(Clone)]
pub struct ServerState {
    pub signaling: SignalingService,
    pub rendezvous: Arc<RendezvousService>,
}

impl ServerState {
    pub fn new() -> Self {
        let signaling = SignalingService::new();
        let rendezvous = Arc::new(RendezvousService::new(Arc::new(signaling.clone())));
        Self {
            signaling,
            rendezvous,
        }
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<ServerState>,
) -> impl IntoResponse {
    // Participant identity is minted by the transport, not the client.
    let peer_id = PeerId::new();

    ws.on_upgrade(move |socket| handle_socket(socket, peer_id, state))
}

async fn handle_socket(socket: WebSocket, peer_id: PeerId, state: ServerState) {
    info!("New WebSocket connection: {}", peer_id);

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    state.signaling.add_peer(peer_id.clone(), tx);

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let state = state.clone();
        let peer_id = peer_id.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => match serde_json::from_str::<SignalMessage>(&text) {
                        Ok(signal) => {
                            state.rendezvous.handle_message(&peer_id, signal).await;
                        }
                        Err(e) => warn!("Invalid SignalMessage from {}: {:?}", peer_id, e),
                    },
                    Message::Close(_) => break,
                    _ => {}
                }
            }

            // Dropped socket counts as a leave for cleanup purposes.
            state.rendezvous.handle_disconnect(&peer_id).await;
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    // Leave is idempotent, so running cleanup on both exit paths is safe.
    state.rendezvous.handle_disconnect(&peer_id).await;
    state.signaling.remove_peer(&peer_id);
    info!("WebSocket disconnected: {}", peer_id);
}
