//! Mock content API tests for the GraphQL source.
//!
//! These tests use wiremock to simulate the content API and check request
//! shape and error classification without network access.

use folio_core::error::{ConfigError, ContentError, Error, NetworkError};
use folio_core::{
    AccessToken, Category, CollectionKind, ContentBlock, ContentConfig, ContentSource,
    EndpointUrl, ItemId, QueryParams,
};
use folio_graphql::GraphQlSource;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GRAPHQL_PATH: &str = "/content/v1/spaces/space1/environments/master";

fn mock_config(server: &MockServer) -> ContentConfig {
    let endpoint = EndpointUrl::new(format!("http://127.0.0.1:{}", server.address().port())).unwrap();
    ContentConfig::new(
        endpoint,
        "space1",
        AccessToken::new("delivery-token"),
        Some(AccessToken::new("preview-token")),
    )
}

fn mock_source(server: &MockServer) -> GraphQlSource {
    GraphQlSource::new(mock_config(server)).unwrap()
}

fn insight(id: &str, date: &str, category: &str) -> serde_json::Value {
    json!({
        "sys": { "id": id, "publishedAt": date },
        "title": format!("Insight {}", id),
        "slug": format!("insight-{}", id),
        "category": category,
        "publishedDate": date,
        "thumbnail": { "url": format!("https://images.example/{}.jpg", id), "width": 800, "height": 600 },
        "excerpt": null
    })
}

// ============================================================================
// Collection Tests
// ============================================================================

#[tokio::test]
async fn test_fetch_collection_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(header("authorization", "Bearer delivery-token"))
        .and(body_partial_json(json!({
            "variables": { "limit": 2, "skip": 0, "preview": false }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "insightCollection": {
                    "total": 5,
                    "skip": 0,
                    "limit": 2,
                    "items": [
                        insight("a1", "2024-04-01T00:00:00Z", "Branding"),
                        insight("a2", "2024-03-01T00:00:00Z", "Strategy")
                    ]
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let source = mock_source(&server);
    let query = QueryParams::new(2).unwrap();
    let collection = source
        .fetch_collection(CollectionKind::Insights, &query, false)
        .await
        .unwrap();

    assert_eq!(collection.total, 5);
    assert!(collection.has_more);
    assert_eq!(collection.items.len(), 2);
    assert_eq!(collection.items[0].id.as_str(), "a1");
    assert_eq!(collection.items[0].category, Some(Category::Branding));
    assert_eq!(collection.items[1].slug, "insight-a2");
}

#[tokio::test]
async fn test_preview_uses_preview_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(header("authorization", "Bearer preview-token"))
        .and(body_partial_json(json!({ "variables": { "preview": true } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "workCollection": { "total": 0, "skip": 0, "limit": 3, "items": [] } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let source = mock_source(&server);
    let query = QueryParams::new(3).unwrap();
    let collection = source
        .fetch_collection(CollectionKind::Work, &query, true)
        .await
        .unwrap();

    assert!(collection.items.is_empty());
    assert!(!collection.has_more);
}

#[tokio::test]
async fn test_filter_variables_sent() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_partial_json(json!({
            "variables": {
                "skip": 6,
                "where": { "category": "News", "sys": { "id_not": "featured1" } },
                "order": ["publishedDate_DESC", "sys_id_ASC"]
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "insightCollection": { "total": 7, "skip": 6, "limit": 6, "items": [
                insight("n7", "2023-01-01T00:00:00Z", "News")
            ] } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let source = mock_source(&server);
    let query = QueryParams::new(6)
        .unwrap()
        .with_skip(6)
        .with_category(Some(Category::News))
        .excluding(Some(ItemId::new("featured1").unwrap()));

    let collection = source
        .fetch_collection(CollectionKind::Insights, &query, false)
        .await
        .unwrap();

    assert_eq!(collection.items.len(), 1);
    assert!(!collection.has_more);
}

#[tokio::test]
async fn test_duplicate_and_null_items_dropped() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "insightCollection": { "total": 3, "skip": 0, "limit": 3, "items": [
                insight("d1", "2024-01-01T00:00:00Z", "Design"),
                null,
                insight("d1", "2024-01-01T00:00:00Z", "Design")
            ] } }
        })))
        .mount(&server)
        .await;

    let source = mock_source(&server);
    let query = QueryParams::new(3).unwrap();
    let collection = source
        .fetch_collection(CollectionKind::Insights, &query, false)
        .await
        .unwrap();

    assert_eq!(collection.items.len(), 1);
    assert_eq!(collection.total, 3);
}

// ============================================================================
// Error Classification Tests
// ============================================================================

#[tokio::test]
async fn test_non_2xx_is_network_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let source = mock_source(&server);
    let query = QueryParams::new(6).unwrap();
    let err = source
        .fetch_collection(CollectionKind::Insights, &query, false)
        .await
        .unwrap_err();

    match err {
        Error::Network(NetworkError::Status { status, body }) => {
            assert_eq!(status, 503);
            assert_eq!(body.as_deref(), Some("upstream unavailable"));
        }
        other => panic!("expected network error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_graphql_errors_classified() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [
                { "message": "Cannot query field \"excerpt\" on type \"Insight\"." },
                { "message": "Query cost exceeded" }
            ]
        })))
        .mount(&server)
        .await;

    let source = mock_source(&server);
    let query = QueryParams::new(6).unwrap();
    let err = source
        .fetch_collection(CollectionKind::Insights, &query, false)
        .await
        .unwrap_err();

    match err {
        Error::GraphQl(e) => {
            assert_eq!(e.messages.len(), 2);
            assert!(e.messages[1].contains("cost"));
        }
        other => panic!("expected GraphQL error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_collection_is_content_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {} })))
        .mount(&server)
        .await;

    let source = mock_source(&server);
    let query = QueryParams::new(6).unwrap();
    let err = source
        .fetch_collection(CollectionKind::Work, &query, false)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Content(ContentError::MissingCollection { ref field }) if field == "workCollection"
    ));
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // Reserve a port, then release it so nothing is listening there.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let endpoint = EndpointUrl::new(format!("http://127.0.0.1:{}", port)).unwrap();
    let config = ContentConfig::new(endpoint, "space1", AccessToken::new("delivery-token"), None);

    let source = GraphQlSource::new(config).unwrap();
    let query = QueryParams::new(6).unwrap();
    let err = source
        .fetch_collection(CollectionKind::Insights, &query, false)
        .await
        .unwrap_err();

    assert!(
        matches!(err, Error::Network(NetworkError::Connection { .. })),
        "expected connection error, got {:?}",
        err
    );
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_missing_preview_token_is_config_error() {
    let server = MockServer::start().await;

    // No request may reach the server.
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let endpoint = EndpointUrl::new(format!("http://127.0.0.1:{}", server.address().port())).unwrap();
    let config = ContentConfig::new(endpoint, "space1", AccessToken::new("delivery-token"), None);
    let source = GraphQlSource::new(config).unwrap();
    let query = QueryParams::new(6).unwrap();

    let err = source
        .fetch_collection(CollectionKind::Insights, &query, true)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Config(ConfigError::MissingVar { .. })));
}

// ============================================================================
// Entry Tests
// ============================================================================

#[tokio::test]
async fn test_fetch_entry_with_blocks() {
    let server = MockServer::start().await;

    let mut entry = insight("w1", "2022-09-01T00:00:00Z", "Branding");
    entry["bodyCollection"] = json!({ "items": [
        { "__typename": "BlockQuote", "text": "Less, but better.", "attribution": null },
        { "__typename": "BlockImage", "image": { "url": "https://images.example/hero.jpg" }, "caption": "Hero" }
    ] });

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_partial_json(json!({ "variables": { "slug": "insight-w1" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "workCollection": { "total": 1, "skip": 0, "limit": 1, "items": [entry] } }
        })))
        .mount(&server)
        .await;

    let source = mock_source(&server);
    let entry = source
        .fetch_entry(CollectionKind::Work, "insight-w1", false)
        .await
        .unwrap()
        .expect("entry should exist");

    assert_eq!(entry.item.id.as_str(), "w1");
    assert_eq!(entry.body.len(), 2);
    assert!(matches!(entry.body[0], ContentBlock::Quote { .. }));
}

#[tokio::test]
async fn test_fetch_entry_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "insightCollection": { "total": 0, "skip": 0, "limit": 1, "items": [] } }
        })))
        .mount(&server)
        .await;

    let source = mock_source(&server);
    let entry = source
        .fetch_entry(CollectionKind::Insights, "nope", false)
        .await
        .unwrap();

    assert!(entry.is_none());
}

#[tokio::test]
async fn test_fetch_entry_unknown_block_fails() {
    let server = MockServer::start().await;

    let mut entry = insight("w2", "2022-09-01T00:00:00Z", "Design");
    entry["bodyCollection"] = json!({ "items": [ { "__typename": "BlockCarousel" } ] });

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "insightCollection": { "total": 1, "skip": 0, "limit": 1, "items": [entry] } }
        })))
        .mount(&server)
        .await;

    let source = mock_source(&server);
    let err = source
        .fetch_entry(CollectionKind::Insights, "insight-w2", false)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Content(ContentError::UnknownBlock { .. })));
}
