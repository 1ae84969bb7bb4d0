use crate::media::{LocalTrack, TrackKind, TrackPair, placeholder_track};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;
use webrtc::track::track_local::TrackLocal;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("no {0} capture device available")]
    Unavailable(TrackKind),
    #[error("{0} capture permission denied")]
    Denied(TrackKind),
    #[error("{kind} capture failed: {reason}")]
    Failed { kind: TrackKind, reason: String },
}

/// Device capture seam. Implementations produce a sendable track for the
/// requested kind or report why they cannot; the adapter degrades to a
/// placeholder either way.
#[async_trait]
pub trait CaptureBackend: Send + Sync {
    async fn capture(&self, kind: TrackKind)
    -> Result<Arc<dyn TrackLocal + Send + Sync>, CaptureError>;
}

/// Backend for headless hosts with no capture hardware: every request
/// degrades to a placeholder.
#[derive(Default)]
pub struct NoDeviceBackend;

#[async_trait]
impl CaptureBackend for NoDeviceBackend {
    async fn capture(
        &self,
        kind: TrackKind,
    ) -> Result<Arc<dyn TrackLocal + Send + Sync>, CaptureError> {
        Err(CaptureError::Unavailable(kind))
    }
}

/// The media capture adapter: turns (want_audio, want_video) into a full
/// track pair, best-effort per kind.
pub struct MediaCapture {
    backend: Arc<dyn CaptureBackend>,
}

impl MediaCapture {
    pub fn new(backend: Arc<dyn CaptureBackend>) -> Self {
        Self { backend }
    }

    pub fn no_device() -> Self {
        Self::new(Arc::new(NoDeviceBackend))
    }

    /// Always returns exactly one audio and one video track. A kind that is
    /// unwanted, unavailable or denied comes back as a placeholder — a
    /// capture failure never fails the call.
    pub async fn acquire(&self, want_audio: bool, want_video: bool) -> TrackPair {
        let audio = self.acquire_kind(TrackKind::Audio, want_audio).await;
        let video = self.acquire_kind(TrackKind::Video, want_video).await;
        TrackPair::new(audio, video)
    }

    async fn acquire_kind(&self, kind: TrackKind, wanted: bool) -> LocalTrack {
        if !wanted {
            return placeholder_track(kind);
        }
        match self.backend.capture(kind).await {
            Ok(track) => LocalTrack::device(kind, track),
            Err(e) => {
                warn!("Falling back to {} placeholder: {}", kind, e);
                placeholder_track(kind)
            }
        }
    }
}
