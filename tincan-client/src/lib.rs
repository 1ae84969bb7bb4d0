pub mod controller;
pub mod engine;
pub mod media;
pub mod session;
pub mod signaling;

pub use controller::{PeerConnectionController, SessionState};
pub use engine::{
    EngineConfig, EngineEvent, EngineFactory, NegotiationEngine, RemoteTrack, WebRtcEngine,
    WebRtcEngineFactory,
};
pub use media::{
    CaptureBackend, CaptureError, LocalTrack, MediaCapture, NoDeviceBackend, TrackKind,
    TrackOrigin, TrackPair,
};
pub use session::{RoomSession, SessionCommand, SessionConfig, SessionEvent, SessionHandle};
pub use signaling::{SignalingChannel, SignalingPair};
