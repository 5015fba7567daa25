use linkmap_search::{SearchClient, SearchError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn endpoint(server: &MockServer) -> String {
    format!("{}/api/search.json", server.uri())
}

#[tokio::test]
async fn test_search_returns_hits_in_api_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/search.json"))
        .and(query_param("q", "childcare"))
        .and(query_param("count", "5"))
        .and(query_param("fields", "content_id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [
                {"_id": "/childcare", "combined_score": 20.0, "content_id": "aaa"},
                {"_id": "/childcare/costs", "combined_score": 9.5, "content_id": "bbb"},
            ],
            "total": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = SearchClient::with_endpoint(endpoint(&server));
    let hits = client.search("childcare", 5).await.unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].url, "/childcare");
    assert_eq!(hits[0].score, 20.0);
    assert_eq!(hits[1].url, "/childcare/costs");
}

#[tokio::test]
async fn test_search_empty_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/search.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"results": [], "total": 0})),
        )
        .mount(&server)
        .await;

    let client = SearchClient::with_endpoint(endpoint(&server));
    let hits = client.search("nonsense-term", 10).await.unwrap();
    assert!(hits.is_empty());
}

#[tokio::test]
async fn test_non_200_surfaces_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/search.json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = SearchClient::with_endpoint(endpoint(&server));
    let err = client.search("childcare", 5).await.unwrap_err();
    match err {
        SearchError::Api { status } => assert_eq!(status, 503),
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rate_limited_is_an_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/search.json"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = SearchClient::with_endpoint(endpoint(&server));
    let err = client.search("childcare", 5).await.unwrap_err();
    assert!(matches!(err, SearchError::Api { status: 429 }));
}

#[tokio::test]
async fn test_malformed_body_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/search.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let client = SearchClient::with_endpoint(endpoint(&server));
    let err = client.search("childcare", 5).await.unwrap_err();
    assert!(matches!(err, SearchError::Parse(_)));
}
