//! # Ingestion Flows
//!
//! The full pipeline over real verification and storage: limits,
//! concurrency, rate limiting and restart.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use ps_01_signature_verification::test_helpers::{signed_request_json, TestKeypair};
    use ps_02_update_storage::{RocksDbConfig, RocksDbUpdateStore, UpdateStore};
    use ps_03_statistics::{StatisticsApi, StatisticsMode};
    use shared_types::{ErrorKind, IngestError};

    use crate::fixtures::TestNode;

    fn node() -> TestNode {
        TestNode::permissive(StatisticsMode::Synchronous)
    }

    #[test]
    fn test_concurrent_distinct_keys_get_dense_ids() {
        const N: usize = 32;
        let node = node();
        let requests: Vec<(TestKeypair, String)> = (0..N)
            .map(|i| {
                let keys = TestKeypair::generate();
                let raw = signed_request_json(&keys, &format!("post {i}"), None);
                (keys, raw)
            })
            .collect();

        let mut ids: Vec<u64> = std::thread::scope(|scope| {
            let handles: Vec<_> = requests
                .iter()
                .map(|(_, raw)| {
                    let ingestion = &node.ingestion;
                    scope.spawn(move || ingestion.submit(raw.as_bytes()).unwrap().id)
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        ids.sort_unstable();
        assert_eq!(ids, (1..=N as u64).collect::<Vec<_>>());

        // Newest first, so timestamps never increase along the list.
        let all = node.ingestion.all_updates().unwrap();
        assert_eq!(all.len(), N);
        assert!(all.windows(2).all(|w| w[0].id > w[1].id && w[0].timestamp >= w[1].timestamp));

        let stats = node.statistics.snapshot().unwrap();
        assert_eq!(stats.unique_pubkeys, N as u64);
        assert_eq!(stats.successful_requests, N as u64);
        for (keys, _) in &requests {
            assert_eq!(node.ledger.post_count(&keys.public_key()), 1);
        }
    }

    #[test]
    fn test_body_and_link_size_boundary() {
        let node = node();
        let keys = TestKeypair::generate();
        let at_limit = "a".repeat(256);
        let over_limit = "a".repeat(257);

        assert!(node
            .ingestion
            .submit(signed_request_json(&keys, &at_limit, None).as_bytes())
            .is_ok());
        assert!(node
            .ingestion
            .submit(signed_request_json(&keys, "x", Some(&at_limit)).as_bytes())
            .is_ok());

        for raw in [
            signed_request_json(&keys, &over_limit, None),
            signed_request_json(&keys, "x", Some(&over_limit)),
            signed_request_json(&keys, "", None),
        ] {
            let err = node.ingestion.submit(raw.as_bytes()).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::BadFormat);
        }
        assert_eq!(node.store.len().unwrap(), 2);
    }

    #[test]
    fn test_size_measured_after_sanitization() {
        let node = node();
        let keys = TestKeypair::generate();
        let body = format!("<script>alert(1)</script>{}", "a".repeat(256));

        let stored = node
            .ingestion
            .submit(signed_request_json(&keys, &body, None).as_bytes())
            .unwrap();
        assert_eq!(stored.body, "a".repeat(256));
    }

    #[test]
    fn test_link_omitted_is_absent() {
        let node = node();
        let keys = TestKeypair::generate();

        let stored = node
            .ingestion
            .submit(signed_request_json(&keys, "no link", None).as_bytes())
            .unwrap();
        assert_eq!(stored.link, None);
        let json = serde_json::to_value(&stored).unwrap();
        assert!(json.get("link").is_none());
    }

    #[test]
    fn test_signature_from_other_key_is_unauthorized() {
        let node = node();
        let signer = TestKeypair::generate();
        let claimed = TestKeypair::generate();

        let mut request: serde_json::Value =
            serde_json::from_str(&signed_request_json(&signer, "hello", None)).unwrap();
        request["pubkey"] = claimed.public_key().to_hex().into();

        let err = node
            .ingestion
            .submit(request.to_string().as_bytes())
            .unwrap_err();
        assert_eq!(err, IngestError::Unauthorized);
        assert!(node.store.is_empty().unwrap());
    }

    #[test]
    fn test_admission_gate_is_global_across_keys() {
        let node = TestNode::new(1, StatisticsMode::Synchronous);
        let a = TestKeypair::generate();
        let b = TestKeypair::generate();

        assert!(node
            .ingestion
            .submit(signed_request_json(&a, "a", None).as_bytes())
            .is_ok());
        let err = node
            .ingestion
            .submit(signed_request_json(&b, "b", None).as_bytes())
            .unwrap_err();
        assert!(matches!(err, IngestError::RateLimited { .. }));

        node.gate_clock.advance(Duration::from_secs(1));
        assert!(node
            .ingestion
            .submit(signed_request_json(&b, "b", None).as_bytes())
            .is_ok());
    }

    #[test]
    fn test_restart_resumes_ids_and_counts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db");
        let keys = TestKeypair::generate();

        {
            let store: Arc<dyn UpdateStore> = Arc::new(
                RocksDbUpdateStore::open(RocksDbConfig::for_testing(path.to_string_lossy())).unwrap(),
            );
            let node = TestNode::with_store(store, 100, StatisticsMode::Synchronous);
            for body in ["one", "two"] {
                node.ingestion
                    .submit(signed_request_json(&keys, body, None).as_bytes())
                    .unwrap();
            }
        }

        let store: Arc<dyn UpdateStore> = Arc::new(
            RocksDbUpdateStore::open(RocksDbConfig::for_testing(path.to_string_lossy())).unwrap(),
        );
        let node = TestNode::with_store(store, 100, StatisticsMode::Synchronous);
        assert_eq!(node.ledger.post_count(&keys.public_key()), 2);

        let stored = node
            .ingestion
            .submit(signed_request_json(&keys, "three", None).as_bytes())
            .unwrap();
        assert_eq!(stored.id, 3);

        let stats = node.statistics.snapshot().unwrap();
        assert_eq!(stats.total_posts, 3);
        // Counters are per process.
        assert_eq!(stats.successful_requests, 1);
    }
}
