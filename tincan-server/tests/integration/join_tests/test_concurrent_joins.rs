use tincan_core::{PeerId, SignalMessage};

use crate::integration::{create_service, init_tracing};
use crate::utils::join;

/// The classic race: two joins on an empty room must never both observe
/// it empty. Exactly one peer becomes the creator.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_joins_yield_one_created_one_joined() {
    init_tracing();

    for round in 0..50 {
        let (service, signaling, _rx) = create_service();
        let room = format!("race-{round}");
        let (a, b) = (PeerId::new(), PeerId::new());

        let t1 = tokio::spawn({
            let service = service.clone();
            let a = a.clone();
            let room = room.clone();
            async move { service.handle_message(&a, join(&room)).await }
        });
        let t2 = tokio::spawn({
            let service = service.clone();
            let b = b.clone();
            let room = room.clone();
            async move { service.handle_message(&b, join(&room)).await }
        });
        t1.await.unwrap();
        t2.await.unwrap();

        let mut outcomes = Vec::new();
        for peer in [&a, &b] {
            let sent = signaling.sent_to(peer).await;
            assert_eq!(sent.len(), 1, "round {round}");
            outcomes.push(sent.into_iter().next().unwrap());
        }

        let created = outcomes
            .iter()
            .filter(|m| matches!(m, SignalMessage::Created))
            .count();
        let joined = outcomes
            .iter()
            .filter(|m| matches!(m, SignalMessage::Joined))
            .count();
        assert_eq!((created, joined), (1, 1), "round {round}: {outcomes:?}");
    }
}
