//! Tests for partition module

use super::*;
use crate::auth::{Credentials, TokenIssuer};
use crate::http::{HttpClient, HttpClientConfig, PageFetcher};
use crate::stream::{Apps, PaginatedStream};
use crate::test_keys::EC_PRIVATE_KEY;
use futures::{StreamExt, TryStreamExt};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn apps_stream(server: &MockServer) -> PaginatedStream {
    let config = HttpClientConfig::builder()
        .base_url(format!("{}/v1/", server.uri()))
        .max_retries(0)
        .no_rate_limit()
        .build();
    let fetcher = PageFetcher::new(HttpClient::with_config(config).unwrap());
    let issuer = TokenIssuer::new(Credentials::new("KEY", "ISSUER", EC_PRIVATE_KEY));
    PaginatedStream::new(Arc::new(Apps), Arc::new(issuer), Arc::new(fetcher), 2)
}

// ============================================================================
// PartitionKey Tests
// ============================================================================

#[test]
fn test_partition_key_app() {
    let key = PartitionKey::app("682658836");
    assert_eq!(key.field(), APP_ID_FIELD);
    assert_eq!(key.value(), "682658836");
}

#[test]
fn test_partition_key_foreign_key() {
    let key = PartitionKey::new("parent_id", "p1");
    let fk = key.foreign_key();
    assert_eq!(fk.len(), 1);
    assert_eq!(fk.get("parent_id"), Some(&json!("p1")));
}

// ============================================================================
// ListRouter Tests
// ============================================================================

#[tokio::test]
async fn test_list_router() {
    let router = ListRouter::new(vec!["a".to_string(), "b".to_string()], APP_ID_FIELD);

    let keys: Vec<PartitionKey> = router.partitions().try_collect().await.unwrap();

    assert_eq!(router.partition_field(), APP_ID_FIELD);
    assert_eq!(router.values(), ["a".to_string(), "b".to_string()]);
    assert_eq!(keys, vec![PartitionKey::app("a"), PartitionKey::app("b")]);
}

#[tokio::test]
async fn test_list_router_empty() {
    let router = ListRouter::new(Vec::new(), APP_ID_FIELD);
    assert_eq!(router.partitions().count().await, 0);
}

// ============================================================================
// ParentRouter Tests
// ============================================================================

#[tokio::test]
async fn test_parent_router_uses_record_ids_across_pages() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/apps"))
        .and(query_param("cursor", "Mg"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"type": "apps", "id": 3}]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/apps"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"type": "apps", "id": "1", "attributes": {"name": "One"}},
                {"type": "apps", "id": "2", "attributes": {"name": "Two"}}
            ],
            "links": {"next": format!("{}/v1/apps?cursor=Mg&limit=2", server.uri())}
        })))
        .mount(&server)
        .await;

    let router = ParentRouter::new(apps_stream(&server), APP_ID_FIELD);
    let keys: Vec<PartitionKey> = router.partitions().try_collect().await.unwrap();

    let ids: Vec<_> = keys.iter().map(PartitionKey::value).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
    assert!(keys.iter().all(|k| k.field() == APP_ID_FIELD));
}

#[tokio::test]
async fn test_parent_router_propagates_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/apps"))
        .respond_with(ResponseTemplate::new(401).set_body_string("NOT_AUTHORIZED"))
        .mount(&server)
        .await;

    let router = ParentRouter::new(apps_stream(&server), APP_ID_FIELD);
    let result: crate::Result<Vec<PartitionKey>> = router.partitions().try_collect().await;

    assert!(result.unwrap_err().is_authorization());
}
