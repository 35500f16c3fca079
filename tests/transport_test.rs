mod common;

use common::{ENDPOINT, MockTransport, init_tracing};
use reqwest::Method;
use reqwest::header::AUTHORIZATION;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wikibase_rest::{Client, Error, RetryPolicy};

fn client(transport: Arc<MockTransport>, policy: RetryPolicy) -> Client {
    init_tracing();
    Client::with_transport(ENDPOINT, Some("abcdefg"), transport)
        .unwrap()
        .with_retry_policy(policy)
}

fn three_attempts() -> RetryPolicy {
    RetryPolicy::new()
        .with_max_retries(3)
        .with_base_delay(Duration::from_secs(1))
        .with_max_delay(Duration::from_secs(60))
}

#[tokio::test(start_paused = true)]
async fn test_retries_are_bounded_with_backoff() {
    let transport = MockTransport::new();
    transport.push_error("failure 1");
    transport.push_error("failure 2");
    transport.push_error("failure 3");
    transport.push_json(200, json!({"never": "reached"}));
    let client = client(transport.clone(), three_attempts());

    let err = client
        .request(Method::GET, "/entities/items/Q1", &[], None)
        .await
        .unwrap_err();

    match err {
        Error::RetriesExhausted { attempts, source } => {
            assert_eq!(attempts, 3);
            assert_eq!(source.to_string(), "failure 3");
        }
        other => panic!("unexpected error: {other}"),
    }

    let times = transport.request_times();
    assert_eq!(times.len(), 3);
    assert_eq!(times[1] - times[0], Duration::from_secs(1));
    assert_eq!(times[2] - times[1], Duration::from_secs(2));
}

#[tokio::test(start_paused = true)]
async fn test_default_policy_attempts_ten_times() {
    let transport = MockTransport::new();
    let client = client(transport.clone(), RetryPolicy::default());

    let err = client
        .request(Method::GET, "/entities/items/Q1", &[], None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::RetriesExhausted { attempts: 10, .. }));

    let times = transport.request_times();
    assert_eq!(times.len(), 10);
    assert_eq!(times[7] - times[6], Duration::from_secs(60));
    assert_eq!(times[9] - times[8], Duration::from_secs(60));
}

#[tokio::test(start_paused = true)]
async fn test_conflict_is_returned_without_retry() {
    let transport = MockTransport::new();
    let conflict = json!({"code": "edit-conflict"});
    transport.push_json(409, conflict.clone());
    let client = client(transport.clone(), three_attempts());

    let body = client
        .request(Method::PATCH, "/entities/items/Q1", &[], Some(&json!({"patch": []})))
        .await
        .unwrap();
    assert_eq!(body, conflict);
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_server_error_then_success() {
    let transport = MockTransport::new();
    transport.push_raw(503, "Service Unavailable");
    transport.push_json(200, json!({"id": "Q1"}));
    let client = client(transport.clone(), three_attempts());

    let body = client
        .request(Method::GET, "/entities/items/Q1", &[], None)
        .await
        .unwrap();
    assert_eq!(body, json!({"id": "Q1"}));
    assert_eq!(transport.requests().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_malformed_json_is_retried() {
    let transport = MockTransport::new();
    transport.push_raw(200, "<html>not json</html>");
    transport.push_raw(200, "{}");
    let client = client(transport.clone(), three_attempts());

    let body = client
        .request(Method::GET, "/entities/items/Q1", &[], None)
        .await
        .unwrap();
    assert_eq!(body, json!({}));
    assert_eq!(transport.requests().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_error_body_is_kept_in_cause() {
    let transport = MockTransport::new();
    for _ in 0..3 {
        transport.push_raw(400, r#"{"code":"invalid-language-code"}"#);
    }
    let client = client(transport.clone(), three_attempts());

    let err = client
        .request(Method::PUT, "/entities/items/Q1/labels/xx", &[], Some(&json!({})))
        .await
        .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("400"));
    assert!(message.contains("invalid-language-code"));
}

#[tokio::test]
async fn test_every_request_carries_bearer_token() {
    let transport = MockTransport::new();
    transport.push_json(200, json!({}));
    transport.push_json(200, json!({}));
    let client = client(transport.clone(), three_attempts());

    client
        .request(Method::GET, "/entities/items/Q1", &[], None)
        .await
        .unwrap();
    client
        .request(Method::DELETE, "/entities/items/Q1", &[], Some(&json!({})))
        .await
        .unwrap();

    for request in transport.requests() {
        assert_eq!(request.headers[AUTHORIZATION], "Bearer abcdefg");
    }
}
