use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};
use tincan_client::session::SessionEvent;

use crate::integration::init_tracing;
use crate::utils::{next_event, spawn_server, start_session};

/// Two sessions against a real rendezvous server: the whole join, ready,
/// offer/answer and candidate exchange, then a leave.
#[tokio::test]
async fn test_call_between_two_sessions() {
    init_tracing();
    let url = spawn_server().await;

    let (host, mut host_events, host_factory) = start_session(&url, "duo").await;
    // Created arrives, the host brings its media up.
    assert!(matches!(
        next_event(&mut host_events).await,
        SessionEvent::LocalMedia(_)
    ));

    let (guest, mut guest_events, _guest_factory) = start_session(&url, "duo").await;
    assert!(matches!(
        next_event(&mut guest_events).await,
        SessionEvent::LocalMedia(_)
    ));

    // Ready triggers the offer; both sides see a remote track once the
    // descriptions have crossed.
    let remote = match next_event(&mut guest_events).await {
        SessionEvent::RemoteConnected(track) => track,
        other => panic!("Guest expected RemoteConnected, got {other:?}"),
    };
    assert_eq!(remote.id, "loopback-remote");
    assert!(matches!(
        next_event(&mut host_events).await,
        SessionEvent::RemoteConnected(_)
    ));

    // The guest's discovered candidate must have crossed the wire into the
    // host's engine.
    let host_engine = host_factory.engines.lock().unwrap()[0].clone();
    let deadline = Instant::now() + Duration::from_secs(5);
    while host_engine.remote_candidates.load(Ordering::SeqCst) == 0 {
        assert!(
            Instant::now() < deadline,
            "Relayed candidate never reached the host engine"
        );
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    guest.leave();
    assert!(matches!(
        next_event(&mut guest_events).await,
        SessionEvent::Ended
    ));
    assert!(matches!(
        next_event(&mut host_events).await,
        SessionEvent::PeerLeft
    ));

    // A device toggle after the peer left still refreshes local media.
    host.toggle_mic();
    assert!(matches!(
        next_event(&mut host_events).await,
        SessionEvent::LocalMedia(_)
    ));

    host.leave();
    assert!(matches!(
        next_event(&mut host_events).await,
        SessionEvent::Ended
    ));
}
