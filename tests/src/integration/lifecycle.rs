//! Transaction lifecycle scenarios: validation reporting and the
//! cancel-versus-expiry race.

#[cfg(test)]
mod tests {
    use rand::Rng;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use wl_02_tx_lifecycle::{
        LifecycleConfig, LifecycleError, MockTransferGateway, TransactionLifecycleManager,
        TransactionStatus, TransferRequest, ValidationError,
    };
    use wl_03_event_client::{
        ClientConfig, EventKind, LedgerEventClient, MockLedgerApi, MockStreamConnector,
    };

    #[tokio::test]
    async fn test_submission_reports_every_violated_rule() {
        crate::init_tracing();

        let manager = TransactionLifecycleManager::new(
            LifecycleConfig::for_testing(),
            Arc::new(MockTransferGateway::accepting()),
        );
        // Negative amount and empty recipient violate two independent rules.
        let request = TransferRequest {
            from: "Alice".into(),
            to: "".into(),
            amount: -5.0,
        };
        let err = manager.submit(&request).await.unwrap_err();
        match err {
            LifecycleError::Validation(errors) => {
                assert!(errors.len() >= 2);
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, ValidationError::AmountNotPositive(_))));
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, ValidationError::MalformedRecipient(_))));
            }
            other => panic!("expected validation errors, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rejected_submission_leaves_no_record() {
        let manager = TransactionLifecycleManager::new(
            LifecycleConfig::for_testing(),
            Arc::new(MockTransferGateway::refusing()),
        );
        let request = TransferRequest {
            from: "Alice".into(),
            to: "Bob".into(),
            amount: 10.0,
        };
        let err = manager.submit(&request).await.unwrap_err();
        assert!(matches!(err, LifecycleError::SubmissionRejected));
    }

    /// Race cancel against the expiry timer at random offsets around the
    /// verification duration. Whoever wins, the transaction must settle in
    /// exactly one terminal state and the completion hook must fire exactly
    /// once for it.
    #[tokio::test]
    async fn test_cancel_and_expiry_have_a_single_winner() {
        let terminals: Arc<Mutex<HashMap<String, Vec<TransactionStatus>>>> =
            Arc::new(Mutex::new(HashMap::new()));
        let seen = Arc::clone(&terminals);
        let manager = Arc::new(
            TransactionLifecycleManager::new(
                LifecycleConfig::for_testing(),
                Arc::new(MockTransferGateway::accepting()),
            )
            .with_completion_hook(move |id, status| {
                seen.lock()
                    .unwrap()
                    .entry(id.to_string())
                    .or_default()
                    .push(status);
            }),
        );

        let duration_ms = LifecycleConfig::for_testing().verification_duration_ms;
        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            let request = TransferRequest {
                from: "Alice".into(),
                to: "Bob".into(),
                amount: 1.0,
            };
            let id = manager.submit(&request).await.unwrap();

            // Land the cancel anywhere from well before to well after expiry.
            let delay_ms = rng.gen_range(0..duration_ms * 2);
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            manager.cancel(&id);

            // Let a racing timer settle before inspecting.
            tokio::time::sleep(Duration::from_millis(duration_ms * 2)).await;

            let tx = manager.transaction(&id).unwrap();
            assert!(
                matches!(
                    tx.status,
                    TransactionStatus::Completed | TransactionStatus::Cancelled
                ),
                "non-terminal status {:?}",
                tx.status
            );
            let seen = terminals.lock().unwrap();
            assert_eq!(
                seen.get(&id).map(Vec::len),
                Some(1),
                "hook fired other than once for {id}"
            );
            assert_eq!(seen[&id][0], tx.status);
        }
    }

    /// A remote `commit` event observed on the push channel settles the
    /// matching verification well before its local timer would.
    #[tokio::test]
    async fn test_commit_event_confirms_pending_verification() {
        // Long local timer so only the remote confirmation can settle it.
        let manager = Arc::new(TransactionLifecycleManager::new(
            LifecycleConfig::default(),
            Arc::new(MockTransferGateway::accepting()),
        ));
        let request = TransferRequest {
            from: "Alice".into(),
            to: "Bob".into(),
            amount: 3.0,
        };
        let id = manager.submit(&request).await.unwrap();

        let connector = Arc::new(MockStreamConnector::delivering(vec![
            r#"{"type":"commit","round":4,"leader":0,
                "includedTx":[{"from":"Alice","to":"Bob","amt":3}],
                "balances":{"Alice":97,"Bob":3}}"#
                .to_string(),
        ]));
        let client = LedgerEventClient::new(
            ClientConfig::for_testing(),
            connector,
            Arc::new(MockLedgerApi::default()),
        );
        let settled = Arc::clone(&manager);
        let tx_id = id.clone();
        client.subscribe(EventKind::Commit, move |_| {
            settled.confirm(&tx_id, true);
        });

        client.connect();
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(
            manager.transaction(&id).unwrap().status,
            TransactionStatus::Completed
        );
        // The confirmation also tore down the timer job.
        assert!(!manager.status(&id).is_verifying);
        // The timer lost the settle; a late expiry cannot re-fire it.
        assert!(!manager.confirm(&id, true));
    }

    #[tokio::test]
    async fn test_progress_reaches_completion() {
        let manager = TransactionLifecycleManager::new(
            LifecycleConfig::for_testing(),
            Arc::new(MockTransferGateway::accepting()),
        );
        let request = TransferRequest {
            from: "Alice".into(),
            to: "Bob".into(),
            amount: 3.0,
        };
        let id = manager.submit(&request).await.unwrap();
        let mut progress = manager.progress(&id).unwrap();

        let mut last = 0.0f64;
        while progress.changed().await.is_ok() {
            let pct = *progress.borrow();
            assert!(pct >= last, "progress went backwards: {last} -> {pct}");
            last = pct;
        }
        assert!((last - 100.0).abs() < f64::EPSILON);
        assert_eq!(
            manager.transaction(&id).unwrap().status,
            TransactionStatus::Completed
        );
    }
}
