pub mod rendezvous;
pub mod server;
pub mod signaling;

pub use rendezvous::{JoinOutcome, RendezvousService, RoomRegistry};
pub use server::{app, run, serve};
pub use signaling::{SignalingOutput, SignalingService, ws_handler};
