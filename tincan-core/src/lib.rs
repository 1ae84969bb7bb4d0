pub mod model;

pub use model::{
    IceCandidateInit, IceServerConfig, PeerId, PeerRole, RoomName, SdpKind, SessionDescription,
    SignalMessage,
};
