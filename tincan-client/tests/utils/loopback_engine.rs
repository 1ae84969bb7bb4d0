use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tincan_client::engine::{
    EngineConfig, EngineEvent, EngineFactory, NegotiationEngine, RemoteTrack,
};
use tincan_client::media::{LocalTrack, TrackKind};
use tincan_core::{IceCandidateInit, SessionDescription};
use tokio::sync::Mutex;
use tokio::sync::mpsc;

/// Stand-in for the real negotiation machinery: produces canned SDP and,
/// once the remote description lands, behaves as if media started flowing
/// by announcing one discovered candidate and one remote track.
pub struct LoopbackEngine {
    events: mpsc::Sender<EngineEvent>,
    senders: Mutex<Vec<TrackKind>>,
    pub remote_candidates: AtomicUsize,
    pub close_calls: AtomicUsize,
}

impl LoopbackEngine {
    pub fn new(events: mpsc::Sender<EngineEvent>) -> Self {
        Self {
            events,
            senders: Mutex::new(Vec::new()),
            remote_candidates: AtomicUsize::new(0),
            close_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl NegotiationEngine for LoopbackEngine {
    async fn create_offer(&self) -> Result<SessionDescription> {
        Ok(SessionDescription::offer("v=0 loopback-offer"))
    }

    async fn create_answer(&self) -> Result<SessionDescription> {
        Ok(SessionDescription::answer("v=0 loopback-answer"))
    }

    async fn set_remote_description(&self, _description: SessionDescription) -> Result<()> {
        let _ = self
            .events
            .send(EngineEvent::CandidateDiscovered(IceCandidateInit {
                candidate: "candidate:loopback 1 udp 1 127.0.0.1 9 typ host".into(),
                sdp_mid: Some("0".into()),
                sdp_m_line_index: Some(0),
            }))
            .await;
        let _ = self
            .events
            .send(EngineEvent::RemoteTrack(RemoteTrack {
                kind: TrackKind::Video,
                id: "loopback-remote".into(),
            }))
            .await;
        Ok(())
    }

    async fn add_ice_candidate(&self, _candidate: IceCandidateInit) -> Result<()> {
        self.remote_candidates.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn add_track(&self, track: &LocalTrack) -> Result<()> {
        self.senders.lock().await.push(track.kind);
        Ok(())
    }

    async fn replace_track(&self, _track: &LocalTrack) -> Result<()> {
        Ok(())
    }

    async fn has_sender(&self, kind: TrackKind) -> bool {
        self.senders.lock().await.contains(&kind)
    }

    async fn close(&self) -> Result<()> {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Default)]
pub struct LoopbackEngineFactory {
    pub engines: std::sync::Mutex<Vec<Arc<LoopbackEngine>>>,
}

#[async_trait]
impl EngineFactory for LoopbackEngineFactory {
    async fn create(
        &self,
        _config: &EngineConfig,
        events: mpsc::Sender<EngineEvent>,
    ) -> Result<Arc<dyn NegotiationEngine>> {
        let engine = Arc::new(LoopbackEngine::new(events));
        self.engines.lock().unwrap().push(engine.clone());
        Ok(engine)
    }
}
