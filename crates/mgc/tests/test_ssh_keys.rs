//! SSH keys API against a mock server

mod common;

use mgc::resources::ssh_keys::CreateSshKeyRequest;
use mgc::ListQuery;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEYS_PATH: &str = "/profile/v0/ssh-keys";

fn key(id: &str) -> serde_json::Value {
    json!({"id": id, "name": "laptop", "key": "ssh-ed25519 AAAAC3Nza", "key_type": "ssh-ed25519"})
}

#[tokio::test]
async fn test_list_single_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(KEYS_PATH))
        .and(query_param("_limit", "2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"results": [key("k1"), key("k2")]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = common::test_client(&server);
    let page = client.ssh_keys().list(ListQuery::new().limit(2)).await.unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(page.total(), None);
    server.verify().await;
}

#[tokio::test]
async fn test_list_all_pages_through_results_envelope() {
    let server = MockServer::start().await;
    let first: Vec<_> = (0..50).map(|n| key(&format!("k{n}"))).collect();
    Mock::given(method("GET"))
        .and(path(KEYS_PATH))
        .and(query_param("_offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": first})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(KEYS_PATH))
        .and(query_param("_offset", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": [key("k50")]})))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::test_client(&server);
    let keys = client.ssh_keys().list_all().await.unwrap();

    assert_eq!(keys.len(), 51);
    assert_eq!(keys.last().map(|k| k.id.as_str()), Some("k50"));
    server.verify().await;
}

#[tokio::test]
async fn test_create_get_delete() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(KEYS_PATH))
        .and(body_json(json!({"name": "laptop", "key": "ssh-ed25519 AAAAC3Nza"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(key("k1")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{KEYS_PATH}/k1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(key("k1")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("{KEYS_PATH}/k1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(key("k1")))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::test_client(&server);
    let keys = client.ssh_keys();

    let created = keys
        .create(CreateSshKeyRequest::new("laptop", "ssh-ed25519 AAAAC3Nza"))
        .await
        .unwrap();
    assert_eq!(created.id, "k1");

    let fetched = keys.get("k1").await.unwrap();
    assert_eq!(fetched, created);

    let deleted = keys.delete("k1").await.unwrap();
    assert_eq!(deleted.name, "laptop");
    server.verify().await;
}
