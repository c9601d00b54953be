//! Event client scenarios over mock transports: snapshot replacement,
//! the reconnect cap and decode-failure accounting.

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use wl_03_event_client::{
        ClientConfig, ClientEvent, ConnectionState, EventKind, LedgerEventClient, MockLedgerApi,
        MockStreamConnector,
    };

    fn client_over(connector: Arc<MockStreamConnector>, config: ClientConfig) -> LedgerEventClient {
        LedgerEventClient::new(config, connector, Arc::new(MockLedgerApi::default()))
    }

    const FIRST_STATE: &str = r#"{"type":"state","round":1,"leader":0,"blockHeight":1,
        "balances":{"alice":100,"bob":50},"mempool":[{"to":"bob","amt":5}],
        "ports":["node0"],"threshold":0.9}"#;

    // Sparse follow-up: no bob balance, no mempool.
    const SECOND_STATE: &str =
        r#"{"type":"state","round":2,"leader":1,"balances":{"alice":70}}"#;

    #[tokio::test]
    async fn test_state_events_replace_snapshot_wholesale() {
        crate::init_tracing();

        let connector = Arc::new(MockStreamConnector::delivering(vec![
            FIRST_STATE.to_string(),
            SECOND_STATE.to_string(),
        ]));
        let client = client_over(Arc::clone(&connector), ClientConfig::for_testing());
        client.connect();
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(client.connection_state(), ConnectionState::Connected);
        // Both fixtures must have decoded, or nothing was at risk of being
        // merged in the first place.
        assert_eq!(client.decode_failures(), 0);
        let snapshot = client.snapshot().unwrap();
        assert_eq!(snapshot.round, 2);
        assert_eq!(snapshot.balance_of("alice"), 70);
        // Fields absent from the newer event reset; nothing is merged in
        // from the older snapshot.
        assert_eq!(snapshot.balance_of("bob"), 0);
        assert_eq!(snapshot.mempool_depth(), 0);
        assert!(snapshot.participants.is_empty());
    }

    #[tokio::test]
    async fn test_reconnects_stop_at_cap_until_manual_connect() {
        let config = ClientConfig {
            base_delay_ms: 50,
            ..ClientConfig::for_testing()
        };
        let connector = Arc::new(MockStreamConnector::always_refusing());
        let client = client_over(Arc::clone(&connector), config.clone());
        client.connect();

        // Delays are 50, 100, 150, 200, 250 ms; wait well past their sum.
        tokio::time::sleep(Duration::from_millis(1500)).await;

        // One initial attempt plus the capped reconnects, then nothing.
        let expected = 1 + config.max_reconnect_attempts as usize;
        assert_eq!(connector.attempt_count(), expected);
        assert_eq!(client.connection_state(), ConnectionState::Disconnected);

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(connector.attempt_count(), expected);

        // Each gap honours its linearly growing delay.
        let attempts = connector.attempts();
        for (n, pair) in attempts.windows(2).enumerate() {
            let gap = pair[1].duration_since(pair[0]);
            let floor = Duration::from_millis(config.base_delay_ms * (n as u64 + 1));
            assert!(
                gap >= floor,
                "gap {n} was {gap:?}, expected at least {floor:?}"
            );
        }

        // A manual connect starts a fresh attempt budget.
        client.connect();
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(connector.attempt_count() > expected);
    }

    #[tokio::test]
    async fn test_malformed_frames_counted_never_dispatched() {
        let connector = Arc::new(MockStreamConnector::delivering(vec![
            "{not json".to_string(),
            r#"{"type":"witness","round":3,"node":1,"corr":0.87}"#.to_string(),
        ]));
        let client = client_over(Arc::clone(&connector), ClientConfig::for_testing());

        let delivered = Arc::new(AtomicUsize::new(0));
        let count = Arc::clone(&delivered);
        client.subscribe(EventKind::Any, move |event| {
            // Any also carries connection-state changes; count ledger
            // events only.
            if matches!(event, ClientEvent::Ledger(_)) {
                count.fetch_add(1, Ordering::SeqCst);
            }
        });

        client.connect();
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(client.decode_failures(), 1);
        // Only the witness event reached subscribers.
        assert_eq!(delivered.load(Ordering::SeqCst), 1);
    }
}
