//! Full-collection walks against a mock API

mod common;

use mgc::{Error, ListQuery, Traversal};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LB_PATH: &str = "/load-balancer/v0beta1/network-load-balancers";

fn lb_page(start: usize, count: usize) -> serde_json::Value {
    let results: Vec<_> = (start..start + count)
        .map(|n| {
            json!({
                "id": format!("lb-{n}"),
                "name": format!("lb {n}"),
                "type": "proxy",
                "visibility": "internal",
                "status": "running",
                "vpc_id": "vpc-1",
                "public_ips": null
            })
        })
        .collect();
    json!({"meta": {"page": {"count": count, "limit": 50, "offset": start, "total": 107}}, "results": results})
}

async fn mount_lb_page(server: &MockServer, offset: usize, count: usize) {
    Mock::given(method("GET"))
        .and(path(LB_PATH))
        .and(query_param("_offset", offset.to_string()))
        .and(query_param("_limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(lb_page(offset, count)))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_list_all_walks_until_short_page() {
    let server = MockServer::start().await;
    mount_lb_page(&server, 0, 50).await;
    mount_lb_page(&server, 50, 50).await;
    mount_lb_page(&server, 100, 7).await;

    let client = common::test_client(&server);
    let all = client.lbaas().load_balancers().list_all().await.unwrap();

    assert_eq!(all.len(), 107);
    let ids: Vec<_> = all.iter().map(|lb| lb.id.clone()).collect();
    let expected: Vec<_> = (0..107).map(|n| format!("lb-{n}")).collect();
    assert_eq!(ids, expected);

    server.verify().await;
}

#[tokio::test]
async fn test_list_all_exact_multiple_needs_empty_page() {
    let server = MockServer::start().await;
    mount_lb_page(&server, 0, 50).await;
    mount_lb_page(&server, 50, 0).await;

    let client = common::test_client(&server);
    let all = client.lbaas().load_balancers().list_all().await.unwrap();

    assert_eq!(all.len(), 50);
    server.verify().await;
}

#[tokio::test]
async fn test_list_all_empty_collection_is_one_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LB_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::test_client(&server);
    let all = client.lbaas().load_balancers().list_all().await.unwrap();

    assert!(all.is_empty());
    server.verify().await;
}

#[tokio::test]
async fn test_list_all_error_discards_partial_results() {
    let server = MockServer::start().await;
    mount_lb_page(&server, 0, 50).await;
    Mock::given(method("GET"))
        .and(path(LB_PATH))
        .and(query_param("_offset", "50"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"error": "forbidden"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::test_client(&server);
    let err = client.lbaas().load_balancers().list_all().await.unwrap_err();

    assert_eq!(err.status(), Some(403));
    assert!(err.to_string().contains("forbidden"));
    server.verify().await;
}

#[tokio::test]
async fn test_list_all_with_page_ceiling() {
    let server = MockServer::start().await;
    mount_lb_page(&server, 0, 50).await;
    mount_lb_page(&server, 50, 50).await;

    let client = common::test_client(&server);
    let err = client
        .lbaas()
        .load_balancers()
        .list_all_with(Traversal::new().max_pages(2))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::PageCeilingReached { pages: 2 }));
    server.verify().await;
}

#[tokio::test]
async fn test_single_page_forwards_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LB_PATH))
        .and(query_param("_offset", "10"))
        .and(query_param("_limit", "5"))
        .and(query_param("_sort", "created_at:desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(lb_page(10, 5)))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::test_client(&server);
    let page = client
        .lbaas()
        .load_balancers()
        .list(ListQuery::new().offset(10).limit(5).sort("created_at:desc"))
        .await
        .unwrap();

    assert_eq!(page.len(), 5);
    assert_eq!(page.total(), Some(107));
    assert_eq!(page.meta.offset, 10);
    server.verify().await;
}

#[tokio::test]
async fn test_nested_collection_walk() {
    let server = MockServer::start().await;
    let listeners_path = format!("{LB_PATH}/lb-1/listeners");
    let first: Vec<_> = common::numbered_items("listener", 0, 50)
        .into_iter()
        .map(|mut item| {
            item["protocol"] = json!("tcp");
            item["port"] = json!(80);
            item
        })
        .collect();

    Mock::given(method("GET"))
        .and(path(listeners_path.as_str()))
        .and(query_param("_offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": {"current_page": 1, "total_count": 51, "total_pages": 2, "total_results": 51},
            "results": first
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(listeners_path.as_str()))
        .and(query_param("_offset", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"id": "listener-50", "name": "last", "protocol": "TLS", "port": 443}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::test_client(&server);
    let all = client.lbaas().listeners().list_all("lb-1").await.unwrap();

    assert_eq!(all.len(), 51);
    assert_eq!(all[50].port, 443);
    server.verify().await;
}

#[tokio::test]
async fn test_ssh_keys_walk_uses_results_envelope() {
    let server = MockServer::start().await;
    let keys: Vec<_> = (0..3)
        .map(|n| json!({"id": format!("k{n}"), "name": "key", "key": "ssh-ed25519 AAAA"}))
        .collect();
    Mock::given(method("GET"))
        .and(path("/profile/v0/ssh-keys"))
        .and(query_param("_offset", "0"))
        .and(query_param("_limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": keys})))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::test_client(&server);
    let all = client.ssh_keys().list_all().await.unwrap();

    assert_eq!(all.len(), 3);
    server.verify().await;
}
