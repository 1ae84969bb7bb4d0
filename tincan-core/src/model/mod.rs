mod peer;
mod room;
mod signaling;

pub use peer::{PeerId, PeerRole};
pub use room::RoomName;
pub use signaling::{
    IceCandidateInit, IceServerConfig, SdpKind, SessionDescription, SignalMessage,
};
