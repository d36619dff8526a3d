//! # Statistics Flows
//!
//! Ingestion feeding statistics through the shared ledger, in both read
//! modes.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use ps_01_signature_verification::test_helpers::{signed_request_json, TestKeypair};
    use ps_03_statistics::{run_refresher, StatisticsApi, StatisticsMode};
    use tokio::sync::watch;

    use crate::fixtures::TestNode;

    fn submit(node: &TestNode, keys: &TestKeypair, body: &str) -> u64 {
        node.ingestion
            .submit(signed_request_json(keys, body, None).as_bytes())
            .unwrap()
            .id
    }

    #[test]
    fn test_a_a_b_statistics() {
        let node = TestNode::permissive(StatisticsMode::Synchronous);
        let a = TestKeypair::from_seed([1; 32]);
        let b = TestKeypair::from_seed([2; 32]);

        submit(&node, &a, "first");
        submit(&node, &a, "second");
        submit(&node, &b, "third");

        let stats = node.statistics.snapshot().unwrap();
        assert_eq!(stats.total_posts, 3);
        assert_eq!(stats.unique_pubkeys, 2);
        assert_eq!(stats.successful_requests, 3);
        assert_eq!(stats.failed_requests, 0);
        assert_eq!(stats.total_requests, 3);
        assert_eq!(stats.average_posts_per_pubkey, 1.5);
        assert_eq!(stats.oldest_post_timestamp, 1_000);
        assert_eq!(stats.most_recent_post_timestamp, 3_000);

        let top: Vec<_> = stats
            .top_prolific_pubkeys
            .iter()
            .map(|p| (p.pubkey, p.count))
            .collect();
        assert_eq!(top, vec![(a.public_key(), 2), (b.public_key(), 1)]);
    }

    #[test]
    fn test_rejections_reach_statistics() {
        let node = TestNode::permissive(StatisticsMode::Synchronous);
        let keys = TestKeypair::generate();

        submit(&node, &keys, "ok");
        assert!(node.ingestion.submit(b"not json").is_err());
        assert!(node.ingestion.updates_by_key("xyz").is_err());

        let stats = node.statistics.snapshot().unwrap();
        assert_eq!(stats.total_posts, 1);
        assert_eq!(stats.successful_requests, 1);
        assert_eq!(stats.failed_requests, 2);
        assert_eq!(stats.total_requests, 3);
    }

    #[test]
    fn test_empty_node_statistics() {
        let node = TestNode::new(7, StatisticsMode::Synchronous);
        let stats = node.statistics.snapshot().unwrap();
        assert_eq!(stats.total_posts, 0);
        assert_eq!(stats.average_posts_per_pubkey, 0.0);
        assert_eq!(stats.most_recent_post_timestamp, 0);
        assert_eq!(stats.oldest_post_timestamp, 0);
        assert!(stats.top_prolific_pubkeys.is_empty());
        assert_eq!(stats.rate_limit_requests_per_second, 7);
        assert_eq!(stats.body_max_size, 256);
        assert_eq!(stats.pubkey_max_size, 32);
        assert_eq!(stats.signature_max_size, 64);
    }

    #[test]
    fn test_periodic_snapshot_is_stale_until_refresh() {
        let node = TestNode::permissive(StatisticsMode::Periodic {
            interval: Duration::from_secs(60),
        });
        let keys = TestKeypair::generate();

        // No persisted snapshot yet: the first read computes and saves one.
        assert_eq!(node.statistics.snapshot().unwrap().total_posts, 0);

        submit(&node, &keys, "hello");
        assert_eq!(node.statistics.snapshot().unwrap().total_posts, 0);

        node.statistics.refresh().unwrap();
        let stats = node.statistics.snapshot().unwrap();
        assert_eq!(stats.total_posts, 1);
        assert_eq!(stats.successful_requests, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresher_catches_up_within_one_interval() {
        let node = TestNode::permissive(StatisticsMode::Periodic {
            interval: Duration::from_secs(1),
        });
        let (tx, rx) = watch::channel(false);
        let handle = tokio::spawn(run_refresher(
            Arc::clone(&node.statistics),
            Duration::from_secs(1),
            rx,
        ));

        // Let the immediate first tick persist the empty snapshot.
        tokio::time::sleep(Duration::from_millis(10)).await;
        submit(&node, &TestKeypair::generate(), "hello");
        assert_eq!(node.statistics.snapshot().unwrap().total_posts, 0);

        tokio::time::sleep(Duration::from_millis(1_100)).await;
        assert_eq!(node.statistics.snapshot().unwrap().total_posts, 1);

        tx.send(true).unwrap();
        handle.await.unwrap();
    }
}
