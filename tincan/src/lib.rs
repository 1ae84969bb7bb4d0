pub use tincan_core::model::{PeerId, PeerRole, RoomName, SignalMessage};

pub mod model {
    pub use tincan_core::model::*;
}

#[cfg(feature = "server")]
pub mod server {
    pub use tincan_server::*;
}

#[cfg(feature = "client")]
pub mod client {
    pub use tincan_client::*;
}
