
use std::sync::Arc;
use tincan_server::RendezvousService;
use tokio::sync::mpsc;
use tracing::Level;

use crate::utils::{Delivery, MockSignalingOutput};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub fn create_service() -> (
    Arc<RendezvousService>,
    MockSignalingOutput,
    mpsc::UnboundedReceiver<Delivery>,
) {
    let (signaling, rx) = MockSignalingOutput::new();
    let service = Arc::new(RendezvousService::new(Arc::new(signaling.clone())));
    (service, signaling, rx)
}
