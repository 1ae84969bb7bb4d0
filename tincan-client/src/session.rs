use crate::controller::PeerConnectionController;
use crate::engine::{EngineConfig, EngineEvent, EngineFactory, RemoteTrack};
use crate::media::{MediaCapture, TrackPair};
use crate::signaling::SignalingPair;
use std::ops::ControlFlow;
use std::sync::Arc;
use tincan_core::{PeerRole, RoomName, SignalMessage};
use tokio::sync::mpsc;
use tracing::{info, warn};

#[derive(Clone)]
pub struct SessionConfig {
    pub engine: EngineConfig,
    pub mic_active: bool,
    pub camera_active: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        // Both devices start off, matching a freshly joined room.
        Self {
            engine: EngineConfig::default(),
            mic_active: false,
            camera_active: false,
        }
    }
}

#[derive(Debug)]
pub enum SessionCommand {
    ToggleMic,
    ToggleCamera,
    Leave,
}

/// Lifecycle notifications for the surrounding UI.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// The outbound pair changed (initial acquisition or a device toggle).
    LocalMedia(TrackPair),
    /// First remote track arrived; the session is connected.
    RemoteConnected(RemoteTrack),
    /// The other participant left; the room is open to a new joiner.
    PeerLeft,
    /// The room already had two members; the session was abandoned.
    RoomFull,
    /// The event loop finished and the channel is closed.
    Ended,
}

/// Cloneable control surface over a running session.
#[derive(Clone)]
pub struct SessionHandle {
    cmd_tx: mpsc::UnboundedSender<SessionCommand>,
}

impl SessionHandle {
    pub fn toggle_mic(&self) {
        let _ = self.cmd_tx.send(SessionCommand::ToggleMic);
    }

    pub fn toggle_camera(&self) {
        let _ = self.cmd_tx.send(SessionCommand::ToggleCamera);
    }

    pub fn leave(&self) {
        let _ = self.cmd_tx.send(SessionCommand::Leave);
    }
}

/// Client-side orchestrator for one room membership: owns the signaling
/// channel, wires its events into the controller and the capture adapter,
/// and exposes join/toggle/leave to the caller.
pub struct RoomSession {
    room: RoomName,
    role: PeerRole,
    mic_active: bool,
    camera_active: bool,
    media: MediaCapture,
    controller: PeerConnectionController,
    local_tracks: Option<TrackPair>,
    signal_tx: mpsc::UnboundedSender<SignalMessage>,
    signal_rx: mpsc::UnboundedReceiver<SignalMessage>,
    engine_rx: mpsc::Receiver<EngineEvent>,
    cmd_rx: mpsc::UnboundedReceiver<SessionCommand>,
    event_tx: mpsc::UnboundedSender<SessionEvent>,
}

impl RoomSession {
    pub fn new(
        room: RoomName,
        config: SessionConfig,
        factory: Arc<dyn EngineFactory>,
        media: MediaCapture,
        channel: SignalingPair,
    ) -> (
        Self,
        SessionHandle,
        mpsc::UnboundedReceiver<SessionEvent>,
    ) {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (engine_tx, engine_rx) = mpsc::channel(256);

        let controller = PeerConnectionController::new(
            room.clone(),
            config.engine,
            factory,
            channel.tx.clone(),
            engine_tx,
        );

        let session = Self {
            room,
            role: PeerRole::Guest,
            mic_active: config.mic_active,
            camera_active: config.camera_active,
            media,
            controller,
            local_tracks: None,
            signal_tx: channel.tx,
            signal_rx: channel.rx,
            engine_rx,
            cmd_rx,
            event_tx,
        };

        (session, SessionHandle { cmd_tx }, event_rx)
    }

    /// Runs the session until leave, room-full or channel loss. Announces
    /// the join as its first act.
    pub async fn run(mut self) {
        self.send(SignalMessage::Join {
            room: self.room.clone(),
        });

        loop {
            tokio::select! {
                Some(msg) = self.signal_rx.recv() => {
                    if self.handle_signal(msg).await.is_break() {
                        break;
                    }
                }
                Some(event) = self.engine_rx.recv() => {
                    self.handle_engine_event(event).await;
                }
                Some(cmd) = self.cmd_rx.recv() => {
                    if self.handle_command(cmd).await.is_break() {
                        break;
                    }
                }
                else => break,
            }
        }

        info!("Session for room '{}' finished", self.room);
        let _ = self.event_tx.send(SessionEvent::Ended);
    }

    async fn handle_signal(&mut self, msg: SignalMessage) -> ControlFlow<()> {
        match msg {
            SignalMessage::Created => {
                self.role = PeerRole::Host;
                self.acquire_local().await;
            }
            SignalMessage::Joined => {
                self.acquire_local().await;
                self.send(SignalMessage::Ready {
                    room: self.room.clone(),
                });
            }
            SignalMessage::Ready { .. } => {
                if self.role.is_host() {
                    match self.local_tracks.clone() {
                        Some(local) => self.controller.initiate_call(&local).await,
                        None => warn!("Peer ready before local media, cannot initiate"),
                    }
                }
            }
            SignalMessage::Offer { description, .. } => {
                if self.role.is_host() {
                    warn!("Host received an offer, ignoring");
                } else {
                    match self.local_tracks.clone() {
                        Some(local) => self.controller.handle_offer(description, &local).await,
                        None => warn!("Offer arrived before local media, ignoring"),
                    }
                }
            }
            SignalMessage::Answer { description, .. } => {
                self.controller.handle_answer(description).await;
            }
            SignalMessage::IceCandidate { candidate, .. } => {
                self.controller.handle_remote_candidate(candidate).await;
            }
            SignalMessage::Leave { .. } => {
                // Peer departed: back to hosting, ready for a new joiner.
                info!("Peer left room '{}'", self.room);
                self.role = PeerRole::Host;
                self.controller.teardown().await;
                let _ = self.event_tx.send(SessionEvent::PeerLeft);
            }
            SignalMessage::Full => {
                info!("Room '{}' is full, abandoning session", self.room);
                let _ = self.event_tx.send(SessionEvent::RoomFull);
                return ControlFlow::Break(());
            }
            // Client-to-server vocabulary; nothing to do if echoed here.
            SignalMessage::Join { .. } => {}
        }
        ControlFlow::Continue(())
    }

    async fn handle_command(&mut self, cmd: SessionCommand) -> ControlFlow<()> {
        match cmd {
            SessionCommand::ToggleMic => {
                self.mic_active = !self.mic_active;
                self.rebuild_tracks().await;
            }
            SessionCommand::ToggleCamera => {
                self.camera_active = !self.camera_active;
                self.rebuild_tracks().await;
            }
            SessionCommand::Leave => {
                self.send(SignalMessage::Leave {
                    room: self.room.clone(),
                });
                self.controller.teardown().await;
                self.local_tracks = None;
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    async fn handle_engine_event(&mut self, event: EngineEvent) {
        let first_remote = self.controller.remote_track().is_none();
        let remote = match &event {
            EngineEvent::RemoteTrack(track) => Some(track.clone()),
            _ => None,
        };

        self.controller.handle_engine_event(event).await;

        if let (true, Some(track)) = (first_remote, remote) {
            let _ = self.event_tx.send(SessionEvent::RemoteConnected(track));
        }
    }

    /// Rebuilds the outbound pair after a device toggle and pushes it down
    /// the controller's in-place replacement path — never a renegotiation.
    async fn rebuild_tracks(&mut self) {
        let pair = self.media.acquire(self.mic_active, self.camera_active).await;
        self.controller.replace_tracks(&pair).await;
        self.local_tracks = Some(pair.clone());
        let _ = self.event_tx.send(SessionEvent::LocalMedia(pair));
    }

    async fn acquire_local(&mut self) {
        let pair = self.media.acquire(self.mic_active, self.camera_active).await;
        self.local_tracks = Some(pair.clone());
        let _ = self.event_tx.send(SessionEvent::LocalMedia(pair));
    }

    fn send(&self, msg: SignalMessage) {
        if self.signal_tx.send(msg).is_err() {
            warn!("Signaling channel closed");
        }
    }
}
