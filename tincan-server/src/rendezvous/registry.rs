use dashmap::DashMap;
use tincan_core::{PeerId, RoomName};

/// Room capacity. A third join is rejected without touching membership.
pub const ROOM_CAPACITY: usize = 2;

/// Result of a join attempt, reported to the joining peer only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    /// The room did not exist; the joiner is now its first member (host).
    Created,
    /// The room had one member; the joiner is now its second (guest).
    Joined,
    /// The room already had two members; membership is unchanged.
    Full,
}

/// Process-wide mapping from room name to its ordered membership.
///
/// Entries are created implicitly on the first join and removed as soon as
/// the last member leaves. Mutation of a single room happens under the
/// map's entry guard, so two racing joins on an empty room cannot both
/// observe it empty.
#[derive(Default)]
pub struct RoomRegistry {
    rooms: DashMap<RoomName, Vec<PeerId>>,
    membership: DashMap<PeerId, RoomName>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A peer occupies at most one room: joining somewhere else vacates
    /// the old room first, and a repeat join of the current room is a
    /// no-op that re-reports the peer's standing.
    pub fn join(&self, peer: PeerId, room: RoomName) -> JoinOutcome {
        if let Some(prior) = self.room_of(&peer) {
            if prior != room {
                self.leave(&peer, &prior);
            }
        }
        let outcome = {
            let mut members = self.rooms.entry(room.clone()).or_default();
            if let Some(pos) = members.iter().position(|p| *p == peer) {
                return if pos == 0 {
                    JoinOutcome::Created
                } else {
                    JoinOutcome::Joined
                };
            }
            if members.len() >= ROOM_CAPACITY {
                return JoinOutcome::Full;
            }
            let outcome = if members.is_empty() {
                JoinOutcome::Created
            } else {
                JoinOutcome::Joined
            };
            members.push(peer);
            outcome
        };
        self.membership.insert(peer, room);
        outcome
    }

    /// Evicts `peer` from `room`. Returns the member to notify, i.e. the
    /// remaining peer, and only when an eviction actually happened — a
    /// second leave for an already-absent peer is a no-op, as is a leave
    /// for an unknown room.
    pub fn leave(&self, peer: &PeerId, room: &RoomName) -> Option<PeerId> {
        let remaining = {
            let mut members = self.rooms.get_mut(room)?;
            let before = members.len();
            members.retain(|p| p != peer);
            if members.len() == before {
                return None;
            }
            members.first().cloned()
        };
        self.rooms.remove_if(room, |_, members| members.is_empty());
        self.membership.remove(peer);
        remaining
    }

    /// The other current member of `room`, if any. Never the sender.
    pub fn other_member(&self, room: &RoomName, sender: &PeerId) -> Option<PeerId> {
        self.rooms
            .get(room)?
            .iter()
            .find(|p| *p != sender)
            .cloned()
    }

    /// The room `peer` currently occupies, for transport-disconnect cleanup.
    pub fn room_of(&self, peer: &PeerId) -> Option<RoomName> {
        self.membership.get(peer).map(|r| r.clone())
    }

    pub fn member_count(&self, room: &RoomName) -> usize {
        self.rooms.get(room).map(|m| m.len()).unwrap_or(0)
    }

    pub fn contains_room(&self, room: &RoomName) -> bool {
        self.rooms.contains_key(room)
    }
}
