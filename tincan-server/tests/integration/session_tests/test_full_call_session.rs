use tincan_core::{PeerId, SignalMessage};

use crate::integration::{create_service, init_tracing};
use crate::utils::{answer, expect_delivery, ice_candidate, join, leave, offer, ready};

/// Drives a whole call through the service in the order a pair of clients
/// would: join, join, ready, offer, answer, trickled candidates, leave.
#[tokio::test]
async fn test_full_call_session_signal_ordering() {
    init_tracing();

    let (service, _signaling, mut rx) = create_service();
    let (host, guest) = (PeerId::new(), PeerId::new());

    service.handle_message(&host, join("call")).await;
    let (to, msg) = expect_delivery(&mut rx).await;
    assert_eq!((to, matches!(msg, SignalMessage::Created)), (host, true));

    service.handle_message(&guest, join("call")).await;
    let (to, msg) = expect_delivery(&mut rx).await;
    assert_eq!((to, matches!(msg, SignalMessage::Joined)), (guest, true));

    // Guest has media up and announces readiness; the host hears it.
    service.handle_message(&guest, ready("call")).await;
    let (to, msg) = expect_delivery(&mut rx).await;
    assert_eq!((to, matches!(msg, SignalMessage::Ready { .. })), (host, true));

    service.handle_message(&host, offer("call", "host-sdp")).await;
    let (to, msg) = expect_delivery(&mut rx).await;
    assert_eq!(to, guest);
    assert!(matches!(msg, SignalMessage::Offer { .. }));

    service.handle_message(&guest, answer("call", "guest-sdp")).await;
    let (to, msg) = expect_delivery(&mut rx).await;
    assert_eq!(to, host);
    assert!(matches!(msg, SignalMessage::Answer { .. }));

    // Trickle from both sides; relay order per sender is arrival order.
    service.handle_message(&host, ice_candidate("call", "h-0")).await;
    service.handle_message(&host, ice_candidate("call", "h-1")).await;
    service.handle_message(&guest, ice_candidate("call", "g-0")).await;

    let mut to_guest = Vec::new();
    let mut to_host = Vec::new();
    for _ in 0..3 {
        let (to, msg) = expect_delivery(&mut rx).await;
        let SignalMessage::IceCandidate { candidate, .. } = msg else {
            panic!("Expected a relayed candidate");
        };
        if to == guest {
            to_guest.push(candidate.candidate);
        } else {
            to_host.push(candidate.candidate);
        }
    }
    assert_eq!(to_guest, ["h-0", "h-1"]);
    assert_eq!(to_host, ["g-0"]);

    service.handle_message(&guest, leave("call")).await;
    let (to, msg) = expect_delivery(&mut rx).await;
    assert_eq!(to, host);
    assert!(matches!(msg, SignalMessage::Leave { .. }));

    assert_eq!(service.registry().member_count(&"call".into()), 1);
}
