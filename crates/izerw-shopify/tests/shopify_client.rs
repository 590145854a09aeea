//! Integration tests for `ShopifyClient` against a local `wiremock` server.

use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use izerw_shopify::{normalize_product, ShopifyClient, ShopifyError};

/// 5-second timeout, no retries.
fn test_client() -> ShopifyClient {
    ShopifyClient::new(5, "izerw-test/0.1", 0, 0).expect("failed to build test ShopifyClient")
}

fn products_json(ids: &[i64]) -> serde_json::Value {
    let products: Vec<_> = ids
        .iter()
        .map(|id| {
            json!({
                "id": id,
                "title": format!("Deck Cleat {id}"),
                "handle": format!("deck-cleat-{id}"),
                "body_html": "<p>Cast 316 stainless.</p>",
                "product_type": "Deck Hardware",
                "vendor": "Sea-Dog",
                "images": [],
                "variants": [{
                    "id": id * 10,
                    "title": "Default Title",
                    "sku": format!("SD-{id}"),
                    "price": "24.95",
                    "available": true,
                    "position": 1
                }]
            })
        })
        .collect();
    json!({ "products": products })
}

#[tokio::test]
async fn fetch_products_page_returns_products_and_link_header() {
    let server = MockServer::start().await;
    let link = format!(
        "<{}/products.json?limit=2&page_info=next-cursor>; rel=\"next\"",
        server.uri()
    );

    Mock::given(method("GET"))
        .and(path("/products.json"))
        .and(query_param("limit", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(products_json(&[1, 2]))
                .insert_header("Link", link.as_str()),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (response, link_header) = test_client()
        .fetch_products_page(&server.uri(), 2, None)
        .await
        .expect("page should load");

    assert_eq!(response.products.len(), 2);
    assert_eq!(link_header.as_deref(), Some(link.as_str()));
}

#[tokio::test]
async fn fetch_all_products_follows_cursors() {
    let server = MockServer::start().await;
    let next_link = format!(
        "<{}/products.json?limit=250&page_info=cursor2>; rel=\"next\"",
        server.uri()
    );

    Mock::given(method("GET"))
        .and(path("/products.json"))
        .and(query_param_is_missing("page_info"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(products_json(&[1, 2]))
                .insert_header("Link", next_link.as_str()),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/products.json"))
        .and(query_param("page_info", "cursor2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_json(&[3])))
        .mount(&server)
        .await;

    let products = test_client()
        .fetch_all_products(&server.uri(), 250, 0)
        .await
        .expect("catalog should load");

    let ids: Vec<i64> = products.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);

    let normalized = normalize_product(products.into_iter().next().unwrap()).unwrap();
    assert_eq!(normalized.category_name.as_deref(), Some("Deck Hardware"));
    assert_eq!(normalized.sku.as_deref(), Some("SD-1"));
    assert_eq!(normalized.description.as_deref(), Some("Cast 316 stainless."));
}

#[tokio::test]
async fn fetch_all_products_empty_catalog() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"products": []})))
        .mount(&server)
        .await;

    let products = test_client()
        .fetch_all_products(&server.uri(), 250, 0)
        .await
        .expect("empty catalog is not an error");
    assert!(products.is_empty());
}

#[tokio::test]
async fn rate_limit_carries_retry_after() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "30"))
        .mount(&server)
        .await;

    let err = test_client()
        .fetch_all_products(&server.uri(), 250, 0)
        .await
        .unwrap_err();

    match err {
        ShopifyError::RateLimited {
            retry_after_secs,
            domain,
        } => {
            assert_eq!(retry_after_secs, 30);
            assert_eq!(domain, "127.0.0.1");
        }
        other => panic!("expected RateLimited, got: {other:?}"),
    }
}

#[tokio::test]
async fn rate_limit_without_retry_after_defaults_to_60s() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = test_client()
        .fetch_all_products(&server.uri(), 250, 0)
        .await
        .unwrap_err();
    assert!(
        matches!(err, ShopifyError::RateLimited { retry_after_secs: 60, .. }),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn not_found_is_typed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = test_client()
        .fetch_all_products(&server.uri(), 250, 0)
        .await
        .unwrap_err();
    assert!(
        matches!(err, ShopifyError::NotFound { ref url } if url.contains("/products.json")),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn server_error_is_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = test_client()
        .fetch_all_products(&server.uri(), 250, 0)
        .await
        .unwrap_err();
    assert!(
        matches!(err, ShopifyError::UnexpectedStatus { status: 502, .. }),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn malformed_body_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>storefront password</html>"))
        .mount(&server)
        .await;

    let err = test_client()
        .fetch_all_products(&server.uri(), 250, 0)
        .await
        .unwrap_err();
    assert!(matches!(err, ShopifyError::Deserialize { .. }), "got: {err:?}");
}

#[tokio::test]
async fn second_page_failure_discards_first_page() {
    let server = MockServer::start().await;
    let next_link = format!(
        "<{}/products.json?limit=250&page_info=broken>; rel=\"next\"",
        server.uri()
    );

    Mock::given(method("GET"))
        .and(path("/products.json"))
        .and(query_param_is_missing("page_info"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(products_json(&[1]))
                .insert_header("Link", next_link.as_str()),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/products.json"))
        .and(query_param("page_info", "broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = test_client().fetch_all_products(&server.uri(), 250, 0).await;
    assert!(
        matches!(result, Err(ShopifyError::UnexpectedStatus { status: 500, .. })),
        "got: {result:?}"
    );
}

#[tokio::test]
async fn retries_after_429_then_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_json(&[5])))
        .expect(1)
        .mount(&server)
        .await;

    let client = ShopifyClient::new(5, "izerw-test/0.1", 1, 0).unwrap();
    let products = client
        .fetch_all_products(&server.uri(), 250, 0)
        .await
        .expect("retry should recover");
    assert_eq!(products.len(), 1);
}

#[tokio::test]
async fn exhausted_retries_return_last_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(429))
        .expect(3)
        .mount(&server)
        .await;

    let client = ShopifyClient::new(5, "izerw-test/0.1", 2, 0).unwrap();
    let err = client
        .fetch_all_products(&server.uri(), 250, 0)
        .await
        .unwrap_err();
    assert!(matches!(err, ShopifyError::RateLimited { .. }));
}
