mod capture;
mod placeholder;

pub use capture::*;
pub use placeholder::*;

use std::fmt;
use std::sync::Arc;
use webrtc::track::track_local::TrackLocal;

/// The two canonical outbound track kinds. A session always sends exactly
/// one of each, so mute toggles never change the sender set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackKind {
    Audio,
    Video,
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackKind::Audio => write!(f, "audio"),
            TrackKind::Video => write!(f, "video"),
        }
    }
}

/// Whether a track came off a real device or was synthesized in its place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackOrigin {
    Device,
    Placeholder,
}

/// One outbound track: a device capture, or a placeholder standing in for
/// a muted/unavailable device.
#[derive(Clone)]
pub struct LocalTrack {
    pub kind: TrackKind,
    pub origin: TrackOrigin,
    pub enabled: bool,
    track: Arc<dyn TrackLocal + Send + Sync>,
}

impl LocalTrack {
    pub fn device(kind: TrackKind, track: Arc<dyn TrackLocal + Send + Sync>) -> Self {
        Self {
            kind,
            origin: TrackOrigin::Device,
            enabled: true,
            track,
        }
    }

    pub fn placeholder(
        kind: TrackKind,
        enabled: bool,
        track: Arc<dyn TrackLocal + Send + Sync>,
    ) -> Self {
        Self {
            kind,
            origin: TrackOrigin::Placeholder,
            enabled,
            track,
        }
    }

    pub fn rtc_track(&self) -> Arc<dyn TrackLocal + Send + Sync> {
        self.track.clone()
    }
}

impl fmt::Debug for LocalTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalTrack")
            .field("kind", &self.kind)
            .field("origin", &self.origin)
            .field("enabled", &self.enabled)
            .finish()
    }
}

/// Exactly one audio plus one video track — the outbound stream shape is
/// fixed so a toggle can always replace in place instead of renegotiating.
#[derive(Debug, Clone)]
pub struct TrackPair {
    pub audio: LocalTrack,
    pub video: LocalTrack,
}

impl TrackPair {
    pub fn new(audio: LocalTrack, video: LocalTrack) -> Self {
        debug_assert_eq!(audio.kind, TrackKind::Audio);
        debug_assert_eq!(video.kind, TrackKind::Video);
        Self { audio, video }
    }

    pub fn tracks(&self) -> [&LocalTrack; 2] {
        [&self.audio, &self.video]
    }
}
