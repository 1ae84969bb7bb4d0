use crate::model::room::RoomName;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IceServerConfig {
    pub urls: Vec<String>,
    pub username: Option<String>,
    pub credential: Option<String>,
}

impl IceServerConfig {
    pub fn stun(url: impl Into<String>) -> Self {
        Self {
            urls: vec![url.into()],
            username: None,
            credential: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SdpKind {
    Offer,
    Answer,
}

/// One side's proposed media/transport parameters, produced by the
/// negotiation engine and relayed verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDescription {
    pub kind: SdpKind,
    pub sdp: String,
}

impl SessionDescription {
    pub fn offer(sdp: impl Into<String>) -> Self {
        Self {
            kind: SdpKind::Offer,
            sdp: sdp.into(),
        }
    }

    pub fn answer(sdp: impl Into<String>) -> Self {
        Self {
            kind: SdpKind::Answer,
            sdp: sdp.into(),
        }
    }
}

/// A connectivity option discovered during negotiation, relayed verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IceCandidateInit {
    pub candidate: String,
    pub sdp_mid: Option<String>,
    pub sdp_m_line_index: Option<u16>,
}

/// The full signaling vocabulary between a participant and the rendezvous
/// service. `created`/`joined`/`full` flow server-to-client only; the rest
/// are relayed to the other member of the room.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", content = "d", rename_all = "kebab-case")]
pub enum SignalMessage {
    Join {
        room: RoomName,
    },
    Created,
    Joined,
    Full,
    Ready {
        room: RoomName,
    },
    Offer {
        room: RoomName,
        description: SessionDescription,
    },
    Answer {
        room: RoomName,
        description: SessionDescription,
    },
    IceCandidate {
        room: RoomName,
        candidate: IceCandidateInit,
    },
    Leave {
        room: RoomName,
    },
}
