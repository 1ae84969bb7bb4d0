mod webrtc_engine;

pub use webrtc_engine::*;

use crate::media::{LocalTrack, TrackKind};
use anyhow::Result;
use async_trait::async_trait;
use tincan_core::{IceCandidateInit, IceServerConfig, SessionDescription};
use tokio::sync::mpsc;

/// Configuration handed to the negotiation engine: at least one STUN/TURN
/// endpoint is needed for any cross-network connectivity.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub ice_servers: Vec<IceServerConfig>,
}

/// Handle to a remote media track announced by the engine.
#[derive(Debug, Clone)]
pub struct RemoteTrack {
    pub kind: TrackKind,
    pub id: String,
}

/// Asynchronous events the engine pushes at the controller. Candidate
/// discovery is an unordered best-effort stream.
#[derive(Debug, Clone)]
pub enum EngineEvent {
    CandidateDiscovered(IceCandidateInit),
    RemoteTrack(RemoteTrack),
    ConnectionLost,
}

/// The narrow boundary over the real-time negotiation machinery. The
/// controller drives it; it never talks to signaling itself.
///
/// `create_offer`/`create_answer` also install the produced description as
/// the local description.
#[async_trait]
pub trait NegotiationEngine: Send + Sync {
    async fn create_offer(&self) -> Result<SessionDescription>;
    async fn create_answer(&self) -> Result<SessionDescription>;
    async fn set_remote_description(&self, description: SessionDescription) -> Result<()>;
    async fn add_ice_candidate(&self, candidate: IceCandidateInit) -> Result<()>;
    async fn add_track(&self, track: &LocalTrack) -> Result<()>;
    async fn replace_track(&self, track: &LocalTrack) -> Result<()>;
    async fn has_sender(&self, kind: TrackKind) -> bool;
    async fn close(&self) -> Result<()>;
}

/// Builds one engine per negotiation session, wiring its events into the
/// supplied channel.
#[async_trait]
pub trait EngineFactory: Send + Sync {
    async fn create(
        &self,
        config: &EngineConfig,
        events: mpsc::Sender<EngineEvent>,
    ) -> Result<std::sync::Arc<dyn NegotiationEngine>>;
}
