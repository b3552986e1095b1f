//! Error mapping and retry behavior

mod common;

use std::time::Duration;

use assert_matches::assert_matches;
use mgc::{Error, ListQuery};
use rstest::rstest;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEYS_PATH: &str = "/profile/v0/ssh-keys";

#[tokio::test]
async fn test_server_errors_are_retried_until_exhausted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(KEYS_PATH))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"error": "internal server error"})),
        )
        .expect(3)
        .mount(&server)
        .await;

    let client = common::test_client(&server);
    let err = client.ssh_keys().list(ListQuery::new()).await.unwrap_err();

    assert_matches!(err, Error::RetryExhausted { attempts: 3, .. });
    assert_eq!(err.status(), Some(500));
    assert!(err.to_string().contains("500"), "{err}");
    server.verify().await;
}

#[tokio::test]
async fn test_retry_recovers_after_transient_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(KEYS_PATH))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(KEYS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::test_client(&server);
    let page = client.ssh_keys().list(ListQuery::new()).await.unwrap();

    assert!(page.is_empty());
    server.verify().await;
}

#[tokio::test]
async fn test_rate_limit_honors_retry_after() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(KEYS_PATH))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("retry-after", "30")
                .set_body_json(json!({"message": "slow down"})),
        )
        .expect(3)
        .mount(&server)
        .await;

    // retry-after is capped by the policy's max interval, so this stays fast.
    let client = common::test_client(&server);
    let err = client.ssh_keys().list(ListQuery::new()).await.unwrap_err();

    assert_eq!(err.retry_after(), Some(Duration::from_secs(30)));
    assert_eq!(err.status(), Some(429));
    server.verify().await;
}

#[rstest]
#[case(400)]
#[case(401)]
#[case(403)]
#[case(404)]
#[case(409)]
#[case(422)]
#[tokio::test]
async fn test_client_errors_are_not_retried(#[case] status: u16) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(KEYS_PATH))
        .respond_with(
            ResponseTemplate::new(status)
                .insert_header("x-request-id", "req-9")
                .set_body_json(json!({"message": "nope", "slug": "some_slug"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = common::test_client(&server);
    let err = client.ssh_keys().list(ListQuery::new()).await.unwrap_err();

    assert_eq!(err.status(), Some(status));
    assert_eq!(err.request_id(), Some("req-9"));
    assert!(!err.is_retryable());
    server.verify().await;
}

#[tokio::test]
async fn test_null_body_on_decode() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{KEYS_PATH}/k1")))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    let client = common::test_client(&server);
    let err = client.ssh_keys().get("k1").await.unwrap_err();

    assert_matches!(err, Error::NullBody);
}

#[tokio::test]
async fn test_malformed_body_is_serialization_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(KEYS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"results": [{"id": 3}]}"#))
        .mount(&server)
        .await;

    let client = common::test_client(&server);
    let err = client.ssh_keys().list_all().await.unwrap_err();

    assert_matches!(err, Error::Serialization(_));
}

#[tokio::test]
async fn test_connection_refused() {
    let client = mgc::Client::builder()
        .api_key(common::TEST_API_KEY)
        .base_url("http://127.0.0.1:1")
        .retry(common::fast_retry(2))
        .build()
        .unwrap();

    let err = client.ssh_keys().list(ListQuery::new()).await.unwrap_err();

    assert_matches!(*err_source(&err), Error::Connection(_));
}

fn err_source(err: &Error) -> &Error {
    match err {
        Error::RetryExhausted { source, .. } => source,
        other => other,
    }
}
