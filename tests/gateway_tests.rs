//! Integration tests for the TMDb gateway against a local mock server.
//!
//! Tests cover:
//! - Credential and default parameters on every request
//! - Status code mapping
//! - Timeout and connection failures
//! - Preflight checks and an end-to-end tool call

use movie_tv_mcp::mcp::{tools, McpServer};
use movie_tv_mcp::models::config::TmdbConfig;
use movie_tv_mcp::preflight;
use movie_tv_mcp::services::tmdb::{Gateway, TmdbClient};
use movie_tv_mcp::ApiError;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ========== TEST FIXTURES ==========

fn config_for(server: &MockServer) -> TmdbConfig {
    TmdbConfig {
        api_key: Some("test-key".to_string()),
        base_url: server.uri(),
        ..Default::default()
    }
}

fn client_for(server: &MockServer) -> TmdbClient {
    TmdbClient::new(config_for(server)).unwrap()
}

async fn mount_status(server: &MockServer, endpoint: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

// ========== REQUEST TESTS ==========

#[tokio::test]
async fn test_request_attaches_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .and(query_param("api_key", "test-key"))
        .and(query_param("language", "en-US"))
        .and(query_param("include_adult", "false"))
        .and(query_param("query", "Alien"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(1)
        .mount(&server)
        .await;

    let body = client_for(&server)
        .request(
            "/search/movie",
            vec![("query".to_string(), "Alien".to_string())],
        )
        .await
        .unwrap();

    assert_eq!(body, json!({"results": []}));
}

#[tokio::test]
async fn test_caller_cannot_override_reserved_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    client_for(&server)
        .request(
            "/search/movie",
            vec![
                ("api_key".to_string(), "spoofed".to_string()),
                ("include_adult".to_string(), "true".to_string()),
            ],
        )
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);

    let pairs: Vec<(String, String)> = requests[0]
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    let api_keys: Vec<&str> = pairs
        .iter()
        .filter(|(k, _)| k == "api_key")
        .map(|(_, v)| v.as_str())
        .collect();
    assert_eq!(api_keys, vec!["test-key"]);
    assert!(pairs.contains(&("include_adult".to_string(), "false".to_string())));
    assert!(!pairs.contains(&("include_adult".to_string(), "true".to_string())));
}

#[tokio::test]
async fn test_missing_key_makes_no_request() {
    let server = MockServer::start().await;
    let config = TmdbConfig {
        api_key: Some("   ".to_string()),
        base_url: server.uri(),
        ..Default::default()
    };
    let client = TmdbClient::new(config).unwrap();

    let err = client.request("/search/movie", Vec::new()).await.unwrap_err();

    assert_eq!(err, ApiError::NotConfigured);
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ========== STATUS MAPPING TESTS ==========

#[tokio::test]
async fn test_status_codes_map_to_errors() {
    let cases = [
        (401, ApiError::InvalidKey),
        (404, ApiError::NotFound),
        (422, ApiError::InvalidParameters),
        (429, ApiError::RateLimited),
        (500, ApiError::ServerError),
        (503, ApiError::ServerError),
        (418, ApiError::Status("418 I'm a teapot".to_string())),
    ];

    for (status, expected) in cases {
        let server = MockServer::start().await;
        mount_status(&server, "/movie/1", status).await;

        let err = client_for(&server)
            .request("/movie/1", Vec::new())
            .await
            .unwrap_err();

        assert_eq!(err, expected, "status {}", status);
    }
}

#[tokio::test]
async fn test_invalid_json_body_is_unexpected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .request("/movie/1", Vec::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Unexpected(_)));
}

// ========== TRANSPORT FAILURE TESTS ==========

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/trending/movie/day"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"results": []}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = TmdbConfig {
        timeout: 1,
        ..config_for(&server)
    };
    let client = TmdbClient::new(config).unwrap();

    let err = client
        .request("/trending/movie/day", Vec::new())
        .await
        .unwrap_err();

    assert_eq!(err, ApiError::Timeout(1));
    assert_eq!(
        err.to_string(),
        "Request timeout after 1 seconds. Please try again."
    );
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let config = TmdbConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        ..TmdbConfig::with_api_key("test-key")
    };
    let client = TmdbClient::new(config).unwrap();

    let err = client.request("/search/movie", Vec::new()).await.unwrap_err();

    assert!(matches!(err, ApiError::Network(_)), "{:?}", err);
}

// ========== PREFLIGHT TESTS ==========

#[tokio::test]
async fn test_preflight_passes_with_accepted_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/authentication"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let client = TmdbClient::new(config.clone()).unwrap();
    let results = preflight::run_preflight_checks(&config, &client).await;

    assert_eq!(results.len(), 2);
    assert!(preflight::all_passed(&results));
}

#[tokio::test]
async fn test_preflight_reports_rejected_key() {
    let server = MockServer::start().await;
    mount_status(&server, "/authentication", 401).await;

    let config = config_for(&server);
    let client = TmdbClient::new(config.clone()).unwrap();
    let results = preflight::run_preflight_checks(&config, &client).await;

    assert!(!preflight::all_passed(&results));
    assert_eq!(results[1].message, "invalid API key");
}

#[tokio::test]
async fn test_preflight_skips_connection_without_key() {
    let server = MockServer::start().await;
    let config = TmdbConfig {
        base_url: server.uri(),
        ..Default::default()
    };
    let client = TmdbClient::new(config.clone()).unwrap();
    let results = preflight::run_preflight_checks(&config, &client).await;

    assert_eq!(results.len(), 1);
    assert!(!results[0].success);
    assert!(results[0].hint.is_some());
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ========== END-TO-END TESTS ==========

#[tokio::test]
async fn test_search_movies_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/genre/movie/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "genres": [{"id": 28, "name": "Action"}, {"id": 878, "name": "Science Fiction"}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/genre/tv/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"genres": [{"id": 18, "name": "Drama"}]})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .and(query_param("query", "The Matrix"))
        .and(query_param("year", "1999"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1,
            "results": [{"id": 603, "title": "The Matrix", "genre_ids": [28, 878], "poster_path": "/poster.jpg"}],
            "total_results": 1,
            "total_pages": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mcp = McpServer::from_config(&config_for(&server)).unwrap();
    let result = tools::call_tool(
        mcp.tools(),
        "search_movies",
        json!({"query": "The Matrix", "year": 1999}),
    )
    .await
    .unwrap();

    assert_eq!(result["success"], true);
    assert_eq!(result["results"][0]["genres"], json!(["Action", "Science Fiction"]));
    assert_eq!(
        result["results"][0]["poster_urls"]["w500"],
        "https://image.tmdb.org/t/p/w500/poster.jpg"
    );
}
