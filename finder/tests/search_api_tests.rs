use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fashion_finder::config::SearchConfig;
use fashion_finder::error::FinderError;
use fashion_finder::models::ItemType;
use fashion_finder::search::{CustomSearchClient, ProductSearch, SearchProvider};

fn config(base_url: String) -> SearchConfig {
    SearchConfig {
        api_key: "test-key".to_string(),
        engine_id: "test-cx".to_string(),
        base_url,
        timeout_secs: 5,
        max_retries: 1,
        num_results: 10,
        language: "lang_fr".to_string(),
    }
}

fn items() -> serde_json::Value {
    json!({
        "items": [
            {
                "title": "Bottines Chelsea cuir marron",
                "link": "https://www.sarenza.com/clarks-desert-chelsea-s1234567.aspx",
                "displayLink": "www.sarenza.com",
                "snippet": "Cuir marron. 159,95 €",
                "pagemap": { "cse_image": [{ "src": "https://img.sarenza.com/1.jpg" }] }
            },
            {
                "title": "Bottines sans image",
                "link": "https://www.spartoo.com/Clarks-x1234567.php",
                "displayLink": "www.spartoo.com",
                "snippet": ""
            }
        ]
    })
}

#[tokio::test]
async fn test_search_sends_credentials_and_maps_items() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .and(query_param("key", "test-key"))
        .and(query_param("cx", "test-cx"))
        .and(query_param("lr", "lang_fr"))
        .respond_with(ResponseTemplate::new(200).set_body_json(items()))
        .expect(1)
        .mount(&server)
        .await;

    let client = CustomSearchClient::new(config(server.uri())).unwrap();
    let hits = client
        .search("bottines chelsea marron", ItemType::Chaussure)
        .await
        .unwrap();

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].display_domain, "www.sarenza.com");
    assert_eq!(hits[0].raw_image.as_deref(), Some("https://img.sarenza.com/1.jpg"));
    assert!(hits[1].raw_image.is_none());
}

#[tokio::test]
async fn test_query_is_wrapped_with_trusted_sites() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .and(query_param(
            "q",
            fashion_finder::search::shopping_query("sac cuir", ItemType::Sac),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = CustomSearchClient::new(config(server.uri())).unwrap();
    let hits = client.search("sac cuir", ItemType::Sac).await.unwrap();
    assert!(hits.is_empty());
}

#[tokio::test]
async fn test_rate_limit_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "1"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(items()))
        .mount(&server)
        .await;

    let client = CustomSearchClient::new(config(server.uri())).unwrap();
    let hits = client.search("bottines", ItemType::Chaussure).await.unwrap();
    assert_eq!(hits.len(), 2);
}

#[tokio::test]
async fn test_persistent_server_error_surfaces_after_retries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;

    let client = CustomSearchClient::new(config(server.uri())).unwrap();
    let err = client.search("bottines", ItemType::Chaussure).await.unwrap_err();
    assert!(matches!(err, FinderError::Search(_)));
}

#[tokio::test]
async fn test_auth_failure_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_string("bad key"))
        .expect(1)
        .mount(&server)
        .await;

    let client = CustomSearchClient::new(config(server.uri())).unwrap();
    let err = client.search("bottines", ItemType::Chaussure).await.unwrap_err();
    assert!(matches!(err, FinderError::ApiAuth(body) if body == "bad key"));
}

#[tokio::test]
async fn test_product_search_delegates_to_client() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(items()))
        .mount(&server)
        .await;

    let search = ProductSearch::new(Some(&config(server.uri()))).unwrap();
    assert!(search.is_available());
    let hits = search.search("bottines", ItemType::Chaussure).await.unwrap();
    assert_eq!(hits.len(), 2);
}

#[tokio::test]
async fn test_empty_query_is_rejected_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = CustomSearchClient::new(config(server.uri())).unwrap();
    let err = client.search("  ", ItemType::Sac).await.unwrap_err();
    assert!(matches!(err, FinderError::Validation(_)));
}
