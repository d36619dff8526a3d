//! # HTTP Flows
//!
//! Requests driven through the gateway router with `oneshot`.

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use ps_01_signature_verification::test_helpers::{signed_request_json, TestKeypair};
    use ps_03_statistics::StatisticsMode;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::fixtures::TestNode;

    async fn send(node: &TestNode, request: Request<Body>) -> (StatusCode, String) {
        let response: Response = node.router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn post(body: String) -> Request<Body> {
        Request::post("/status")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_post_list_lookup_stats() {
        let node = TestNode::permissive(StatisticsMode::Synchronous);
        let a = TestKeypair::generate();
        let b = TestKeypair::generate();

        for (keys, body) in [(&a, "a1"), (&b, "b1"), (&a, "a2")] {
            let (status, _) = send(&node, post(signed_request_json(keys, body, None))).await;
            assert_eq!(status, StatusCode::OK);
        }

        let (status, text) = send(&node, get("/status")).await;
        assert_eq!(status, StatusCode::OK);
        let all: Value = serde_json::from_str(&text).unwrap();
        let ids: Vec<u64> = all
            .as_array()
            .unwrap()
            .iter()
            .map(|u| u["id"].as_u64().unwrap())
            .collect();
        assert_eq!(ids, vec![3, 2, 1]);

        let (status, text) = send(&node, get(&format!("/status/{}", a.public_key().to_hex()))).await;
        assert_eq!(status, StatusCode::OK);
        let mine: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(mine[0]["body"], "a2");
        assert_eq!(mine[1]["body"], "a1");

        let (status, text) = send(&node, get("/stats")).await;
        assert_eq!(status, StatusCode::OK);
        let stats: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(stats["total_posts"], 3);
        assert_eq!(stats["unique_pubkeys"], 2);
        assert_eq!(stats["top_prolific_pubkeys"][0]["pubkey"], a.public_key().to_hex());
        assert_eq!(stats["top_prolific_pubkeys"][0]["count"], 2);
    }

    #[tokio::test]
    async fn test_malformed_hex_lookup() {
        let node = TestNode::permissive(StatisticsMode::Synchronous);

        for key in ["xyz".to_string(), "ab".repeat(31), "ab".repeat(33)] {
            let (status, text) = send(&node, get(&format!("/status/{key}"))).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(text, "Invalid public key");
        }

        let (_, text) = send(&node, get("/stats")).await;
        let stats: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(stats["failed_requests"], 3);
    }

    #[tokio::test]
    async fn test_oversized_body_and_undecodable_path_counted() {
        let node = TestNode::permissive(StatisticsMode::Synchronous);

        let (status, text) = send(&node, post("x".repeat(20 * 1024))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(text, "Invalid request payload");

        let (status, text) = send(&node, get("/status/%FF%FE")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(text, "Invalid public key");

        let (_, text) = send(&node, get("/stats")).await;
        let stats: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(stats["failed_requests"], 2);
        assert_eq!(stats["total_requests"], 2);
    }

    #[tokio::test]
    async fn test_unknown_key_lookup_is_empty_list() {
        let node = TestNode::permissive(StatisticsMode::Synchronous);
        let (status, text) = send(&node, get(&format!("/status/{}", "00".repeat(32)))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(text, "[]");
    }

    #[tokio::test]
    async fn test_size_boundary_over_http() {
        let node = TestNode::permissive(StatisticsMode::Synchronous);
        let keys = TestKeypair::generate();

        let (status, _) = send(&node, post(signed_request_json(&keys, &"b".repeat(256), None))).await;
        assert_eq!(status, StatusCode::OK);

        let (status, text) = send(&node, post(signed_request_json(&keys, &"b".repeat(257), None))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(text, "invalid field sizes");
    }

    #[tokio::test]
    async fn test_link_omitted_over_http() {
        let node = TestNode::permissive(StatisticsMode::Synchronous);
        let keys = TestKeypair::generate();

        let (status, text) = send(&node, post(signed_request_json(&keys, "plain", None))).await;
        assert_eq!(status, StatusCode::OK);
        let stored: Value = serde_json::from_str(&text).unwrap();
        assert!(stored.get("link").is_none());

        let (_, text) = send(&node, post(signed_request_json(&keys, "linked", Some("https://example.com")))).await;
        let stored: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(stored["link"], "https://example.com");
    }

    #[tokio::test]
    async fn test_client_id_and_timestamp_ignored() {
        let node = TestNode::permissive(StatisticsMode::Synchronous);
        let keys = TestKeypair::generate();

        let mut request: Value =
            serde_json::from_str(&signed_request_json(&keys, "hello", None)).unwrap();
        request["id"] = 999.into();
        request["timestamp"] = 5.into();

        let (status, text) = send(&node, post(request.to_string())).await;
        assert_eq!(status, StatusCode::OK);
        let stored: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(stored["id"], 1);
        assert_ne!(stored["timestamp"], 5);
    }

    #[tokio::test]
    async fn test_rate_limited_over_http() {
        let node = TestNode::new(1, StatisticsMode::Synchronous);
        let keys = TestKeypair::generate();

        let (status, _) = send(&node, post(signed_request_json(&keys, "one", None))).await;
        assert_eq!(status, StatusCode::OK);
        let (status, text) = send(&node, post(signed_request_json(&keys, "two", None))).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(text, "Rate limit exceeded");
    }
}
