use crate::engine::{EngineConfig, EngineEvent, EngineFactory, NegotiationEngine, RemoteTrack};
use crate::media::TrackPair;
use std::sync::Arc;
use tincan_core::{IceCandidateInit, PeerRole, RoomName, SessionDescription, SignalMessage};
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

/// Lifecycle of one peer session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Negotiating(PeerRole),
    Connected,
    Closed,
}

/// Owns the negotiation engine handle for one room membership and drives
/// the offer/answer/candidate exchange.
///
/// Negotiation failures are logged and leave the session in its current
/// state; only an explicit teardown (leave, peer departure, room full)
/// closes a session.
pub struct PeerConnectionController {
    room: RoomName,
    config: EngineConfig,
    factory: Arc<dyn EngineFactory>,
    engine: Option<Arc<dyn NegotiationEngine>>,
    engine_events: mpsc::Sender<EngineEvent>,
    state: SessionState,
    remote_description_set: bool,
    pending_candidates: Vec<IceCandidateInit>,
    pending_tracks: Option<TrackPair>,
    remote_track: Option<RemoteTrack>,
    signal_tx: mpsc::UnboundedSender<SignalMessage>,
}

impl PeerConnectionController {
    pub fn new(
        room: RoomName,
        config: EngineConfig,
        factory: Arc<dyn EngineFactory>,
        signal_tx: mpsc::UnboundedSender<SignalMessage>,
        engine_events: mpsc::Sender<EngineEvent>,
    ) -> Self {
        Self {
            room,
            config,
            factory,
            engine: None,
            engine_events,
            state: SessionState::Idle,
            remote_description_set: false,
            pending_candidates: Vec::new(),
            pending_tracks: None,
            remote_track: None,
            signal_tx,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn remote_track(&self) -> Option<&RemoteTrack> {
        self.remote_track.as_ref()
    }

    /// Host entry point: peer announced `ready`, local media is available.
    pub async fn initiate_call(&mut self, local: &TrackPair) {
        let engine = match self.build_engine(local).await {
            Ok(engine) => engine,
            Err(e) => {
                error!("Failed to build negotiation engine: {:?}", e);
                return;
            }
        };

        self.state = SessionState::Negotiating(PeerRole::Host);
        match engine.create_offer().await {
            Ok(description) => self.transmit(SignalMessage::Offer {
                room: self.room.clone(),
                description,
            }),
            Err(e) => error!("Failed to create offer: {:?}", e),
        }
    }

    /// Guest entry point: a remote offer arrived.
    pub async fn handle_offer(&mut self, offer: SessionDescription, local: &TrackPair) {
        let engine = match self.build_engine(local).await {
            Ok(engine) => engine,
            Err(e) => {
                error!("Failed to build negotiation engine: {:?}", e);
                return;
            }
        };

        self.state = SessionState::Negotiating(PeerRole::Guest);
        if let Err(e) = engine.set_remote_description(offer).await {
            error!("Failed to apply remote offer: {:?}", e);
            return;
        }
        self.remote_description_set = true;
        self.drain_candidates().await;

        match engine.create_answer().await {
            Ok(description) => self.transmit(SignalMessage::Answer {
                room: self.room.clone(),
                description,
            }),
            Err(e) => error!("Failed to create answer: {:?}", e),
        }
    }

    /// Host side: apply the relayed answer. A rejected answer is logged and
    /// the session stays `Negotiating`; it simply never completes.
    pub async fn handle_answer(&mut self, answer: SessionDescription) {
        let Some(engine) = self.engine.clone() else {
            warn!("Answer received with no active negotiation, ignoring");
            return;
        };
        if let Err(e) = engine.set_remote_description(answer).await {
            error!("Failed to apply remote answer: {:?}", e);
            return;
        }
        self.remote_description_set = true;
        self.drain_candidates().await;
    }

    /// Remote candidates arriving before the remote description are
    /// buffered and applied in arrival order once it lands.
    pub async fn handle_remote_candidate(&mut self, candidate: IceCandidateInit) {
        if !self.remote_description_set || self.engine.is_none() {
            debug!("Buffering early ICE candidate");
            self.pending_candidates.push(candidate);
            return;
        }
        if let Some(engine) = self.engine.clone() {
            if let Err(e) = engine.add_ice_candidate(candidate).await {
                warn!("Failed to add ICE candidate: {:?}", e);
            }
        }
    }

    pub async fn handle_engine_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::CandidateDiscovered(candidate) => {
                self.transmit(SignalMessage::IceCandidate {
                    room: self.room.clone(),
                    candidate,
                });
            }
            EngineEvent::RemoteTrack(track) => {
                if self.remote_track.is_none() {
                    self.state = SessionState::Connected;
                }
                self.remote_track = Some(track);
            }
            EngineEvent::ConnectionLost => {
                // Not a lifecycle event; the session closes only on an
                // explicit leave/full/peer departure.
                warn!("Negotiation engine reported connection loss");
            }
        }
    }

    /// Device toggle path. Replaces the sender's track in place when one
    /// exists for the kind, adds it otherwise; queued until an engine
    /// exists. Never triggers renegotiation.
    pub async fn replace_tracks(&mut self, pair: &TrackPair) {
        let Some(engine) = self.engine.clone() else {
            self.pending_tracks = Some(pair.clone());
            return;
        };
        for track in pair.tracks() {
            let result = if engine.has_sender(track.kind).await {
                engine.replace_track(track).await
            } else {
                engine.add_track(track).await
            };
            if let Err(e) = result {
                warn!("Failed to update {} track: {:?}", track.kind, e);
            }
        }
    }

    /// Detaches and closes the engine and clears per-session negotiation
    /// state. A no-op when no engine is live.
    pub async fn teardown(&mut self) {
        let Some(engine) = self.engine.take() else {
            return;
        };
        if let Err(e) = engine.close().await {
            warn!("Error closing negotiation engine: {:?}", e);
        }
        self.remote_track = None;
        self.pending_candidates.clear();
        self.remote_description_set = false;
        self.state = SessionState::Closed;
    }

    async fn build_engine(&mut self, local: &TrackPair) -> anyhow::Result<Arc<dyn NegotiationEngine>> {
        // One live engine per session: replacing requires tearing down the
        // previous one first.
        if self.engine.is_some() {
            self.teardown().await;
        }

        let engine = self
            .factory
            .create(&self.config, self.engine_events.clone())
            .await?;

        // A toggle that raced ahead of the engine wins over the pair the
        // session was created with.
        let effective = self.pending_tracks.take().unwrap_or_else(|| local.clone());
        for track in effective.tracks() {
            engine.add_track(track).await?;
        }

        self.engine = Some(engine.clone());
        Ok(engine)
    }

    async fn drain_candidates(&mut self) {
        let Some(engine) = self.engine.clone() else {
            return;
        };
        for candidate in std::mem::take(&mut self.pending_candidates) {
            if let Err(e) = engine.add_ice_candidate(candidate).await {
                warn!("Failed to add buffered ICE candidate: {:?}", e);
            }
        }
    }

    fn transmit(&self, msg: SignalMessage) {
        // Best-effort: a dropped signaling channel is detected elsewhere.
        if self.signal_tx.send(msg).is_err() {
            warn!("Signaling channel closed, message dropped");
        }
    }
}
