//! Client configuration, headers and endpoint routing

mod common;

use std::sync::Arc;

use mgc::http::{Endpoint, Method, MgcHttpProvider};
use mgc::{Client, ClientConfig, Error, ListQuery, Region, RequestContext};
use mgc_core::retry::ExponentialBackoff;
use serde_json::json;
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn empty_results() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"results": []}))
}

#[tokio::test]
async fn test_api_key_and_default_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/profile/v0/ssh-keys"))
        .and(header("x-api-key", "secret-key"))
        .and(header("content-type", "application/json"))
        .and(header("x-custom", "yes"))
        .and(header("user-agent", "custom-agent/1.0"))
        .respond_with(empty_results())
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::builder()
        .api_key("secret-key")
        .base_url(server.uri())
        .user_agent("custom-agent/1.0")
        .default_header("x-custom", "yes")
        .unwrap()
        .build()
        .unwrap();
    client.ssh_keys().list(ListQuery::new()).await.unwrap();

    server.verify().await;
}

#[tokio::test]
async fn test_jwt_sent_without_bearer_prefix() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/profile/v0/ssh-keys"))
        .and(header("authorization", "eyJhbGciOi.token"))
        .respond_with(empty_results())
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::builder()
        .jwt_token("Bearer eyJhbGciOi.token")
        .base_url(server.uri())
        .build()
        .unwrap();
    client.ssh_keys().list(ListQuery::new()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(!requests[0].headers.contains_key("x-api-key"));
    server.verify().await;
}

#[tokio::test]
async fn test_request_id_from_context() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/profile/v0/ssh-keys"))
        .and(header("x-request-id", "req-42"))
        .respond_with(empty_results().insert_header("x-request-id", "req-42"))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::test_client(&server)
        .with_context(RequestContext::new().with_request_id("req-42"));
    client.ssh_keys().list_all().await.unwrap();

    server.verify().await;
}

#[tokio::test]
async fn test_generated_request_id_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header_exists("x-request-id"))
        .respond_with(empty_results())
        .expect(1)
        .mount(&server)
        .await;

    let client = common::test_client(&server)
        .with_context(RequestContext::new().with_generated_request_id());
    client.ssh_keys().list(ListQuery::new()).await.unwrap();

    server.verify().await;
}

#[tokio::test]
async fn test_global_services_use_global_base_url() {
    let regional = MockServer::start().await;
    let global = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/profile/v0/ssh-keys"))
        .respond_with(empty_results())
        .expect(1)
        .mount(&global)
        .await;
    Mock::given(method("GET"))
        .and(path("/load-balancer/v0beta1/network-load-balancers"))
        .respond_with(empty_results())
        .expect(1)
        .mount(&regional)
        .await;

    let provider = MgcHttpProvider::builder()
        .api_key(common::TEST_API_KEY)
        .base_url(regional.uri())
        .global_base_url(global.uri())
        .backoff(ExponentialBackoff::builder().max_attempts(1).build())
        .build()
        .unwrap();
    let client = Client::from_provider(Arc::new(provider));

    client.ssh_keys().list_all().await.unwrap();
    client.lbaas().load_balancers().list_all().await.unwrap();

    regional.verify().await;
    global.verify().await;
}

#[test]
fn test_region_routing_without_override() {
    let client = Client::builder()
        .api_key("k")
        .region(Region::BrNe1)
        .build()
        .unwrap();

    let regional = client
        .request(Endpoint::Regional, Method::GET, "/volume/v1/volumes")
        .unwrap();
    let global = client
        .request(Endpoint::Global, Method::GET, "/profile/v0/ssh-keys")
        .unwrap();

    assert_eq!(
        regional.url().as_str(),
        "https://api.magalu.cloud/br-ne1/volume/v1/volumes"
    );
    assert_eq!(
        global.url().as_str(),
        "https://api.magalu.cloud/profile/v0/ssh-keys"
    );
}

#[test]
fn test_from_env() {
    temp_env::with_vars(
        [
            ("MGC_API_KEY", Some("env-key")),
            ("MGC_JWT_TOKEN", None),
            ("MGC_REGION", Some("br-mgl1")),
            ("MGC_BASE_URL", None),
            ("MGC_TIMEOUT", Some("not-a-number")),
            ("MGC_MAX_ATTEMPTS", Some("5")),
            ("MGC_USER_AGENT", None),
        ],
        || {
            let config = ClientConfig::from_env().unwrap();
            assert_eq!(config.region, Region::BrMgl1);
            assert_eq!(config.retry.max_attempts, 5);
            assert_eq!(config.timeout, ClientConfig::default().timeout);

            let client = Client::from_config(config).unwrap();
            assert_eq!(client.base_url(), "https://api.magalu.cloud/br-se-1");
        },
    );
}

#[test]
fn test_from_env_unknown_region() {
    temp_env::with_vars(
        [("MGC_API_KEY", Some("env-key")), ("MGC_REGION", Some("mars-1"))],
        || {
            let err = ClientConfig::from_env().unwrap_err();
            assert!(matches!(err, Error::MissingConfig(_)));
        },
    );
}

#[test]
fn test_invalid_default_header() {
    let result = Client::builder().api_key("k").default_header("bad header", "v");
    assert!(matches!(result, Err(Error::InvalidHeaderName(_))));
}
