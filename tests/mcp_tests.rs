//! Integration tests for MCP dispatch and the stdio transport.
//!
//! Tests cover:
//! - initialize, ping, tools and resources methods
//! - Notifications and protocol errors
//! - Line-delimited stdio loop driven in memory

use async_trait::async_trait;
use movie_tv_mcp::mcp::protocol::{JsonRpcRequest, JsonRpcResponse, RequestId};
use movie_tv_mcp::mcp::{stdio, McpServer};
use movie_tv_mcp::models::config::TmdbConfig;
use movie_tv_mcp::services::tmdb::{Gateway, QueryParams};
use movie_tv_mcp::{ApiError, ApiResult};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// ========== TEST FIXTURES ==========

#[derive(Default)]
struct StubGateway {
    calls: AtomicUsize,
}

#[async_trait]
impl Gateway for StubGateway {
    async fn request(&self, endpoint: &str, _params: QueryParams) -> ApiResult<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match endpoint {
            "/genre/movie/list" => Ok(json!({"genres": [{"id": 28, "name": "Action"}]})),
            "/genre/tv/list" => Ok(json!({"genres": [{"id": 18, "name": "Drama"}]})),
            "/trending/movie/week" => Ok(json!({
                "results": [{"id": 1, "title": "Trending", "genre_ids": [28]}],
                "total_results": 1,
                "total_pages": 1
            })),
            _ => Err(ApiError::NotFound),
        }
    }
}

fn server() -> (McpServer, Arc<StubGateway>) {
    let gateway = Arc::new(StubGateway::default());
    let config = TmdbConfig::with_api_key("secret");
    (McpServer::with_gateway(config, gateway.clone()), gateway)
}

fn request(id: i64, method: &str, params: Option<Value>) -> JsonRpcRequest {
    JsonRpcRequest::new(Some(RequestId::Number(id)), method, params)
}

async fn call(server: &McpServer, id: i64, method: &str, params: Option<Value>) -> JsonRpcResponse {
    server
        .handle_request(request(id, method, params))
        .await
        .expect("request with id must get a response")
}

fn tool_payload(response: &JsonRpcResponse) -> (Value, bool) {
    let result = response.result.as_ref().unwrap();
    let text = result["content"][0]["text"].as_str().unwrap();
    (
        serde_json::from_str(text).unwrap(),
        result["isError"].as_bool().unwrap(),
    )
}

async fn read_genres(server: &McpServer, id: i64) -> Value {
    let response = call(
        server,
        id,
        "resources/read",
        Some(json!({"uri": "data://popular-genres"})),
    )
    .await;
    let result = response.result.unwrap();
    serde_json::from_str(result["contents"][0]["text"].as_str().unwrap()).unwrap()
}

// ========== DISPATCH TESTS ==========

#[tokio::test]
async fn test_initialize() {
    let (server, _) = server();

    let response = call(&server, 1, "initialize", Some(json!({"protocolVersion": "2024-11-05"}))).await;

    assert_eq!(response.id, Some(RequestId::Number(1)));
    let result = response.result.unwrap();
    assert_eq!(result["protocolVersion"], "2024-11-05");
    assert_eq!(result["serverInfo"]["name"], "movie-tv-mcp");
    assert!(result["capabilities"].get("tools").is_some());
    assert!(result["capabilities"].get("resources").is_some());
}

#[tokio::test]
async fn test_ping() {
    let (server, _) = server();
    let response = call(&server, 2, "ping", None).await;
    assert_eq!(response.result, Some(json!({})));
}

#[tokio::test]
async fn test_tools_list() {
    let (server, _) = server();

    let response = call(&server, 3, "tools/list", None).await;

    let tools = response.result.unwrap()["tools"].as_array().unwrap().clone();
    assert_eq!(tools.len(), 6);
    assert!(tools.iter().all(|t| t["inputSchema"]["type"] == "object"));
}

#[tokio::test]
async fn test_tools_call_success() {
    let (server, _) = server();

    let response = call(
        &server,
        4,
        "tools/call",
        Some(json!({
            "name": "get_trending",
            "arguments": {"media_type": "movie", "time_window": "week"}
        })),
    )
    .await;

    let (payload, is_error) = tool_payload(&response);
    assert!(!is_error);
    assert_eq!(payload["success"], true);
    assert_eq!(payload["results"][0]["genres"], json!(["Action"]));
}

#[tokio::test]
async fn test_tools_call_failure_sets_is_error() {
    let (server, gateway) = server();

    let response = call(
        &server,
        5,
        "tools/call",
        Some(json!({"name": "get_trending", "arguments": {"media_type": "invalid"}})),
    )
    .await;

    let (payload, is_error) = tool_payload(&response);
    assert!(is_error);
    assert_eq!(payload["success"], false);
    assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_tools_call_text_is_pretty_printed() {
    let (server, _) = server();

    let response = call(
        &server,
        6,
        "tools/call",
        Some(json!({"name": "get_movie_details", "arguments": {"movie_id": 99}})),
    )
    .await;

    let text = response.result.unwrap()["content"][0]["text"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(text.contains('\n'));
    assert!(text.contains("Resource not found"));
}

#[tokio::test]
async fn test_unknown_tool_is_method_not_found() {
    let (server, _) = server();

    let response = call(
        &server,
        7,
        "tools/call",
        Some(json!({"name": "get_person", "arguments": {}})),
    )
    .await;

    let error = response.error.unwrap();
    assert_eq!(error.code, -32601);
    assert!(error.message.contains("get_person"));
}

#[tokio::test]
async fn test_tools_call_without_params() {
    let (server, _) = server();
    let response = call(&server, 8, "tools/call", None).await;
    assert_eq!(response.error.unwrap().code, -32602);
}

#[tokio::test]
async fn test_unknown_method() {
    let (server, _) = server();
    let response = call(&server, 9, "prompts/list", None).await;
    assert_eq!(response.error.unwrap().code, -32601);
}

#[tokio::test]
async fn test_notification_gets_no_response() {
    let (server, gateway) = server();

    let notification = JsonRpcRequest::new(None, "notifications/initialized", None);
    assert!(server.handle_request(notification).await.is_none());

    let tool_notification = JsonRpcRequest::new(
        None,
        "tools/call",
        Some(json!({"name": "get_trending", "arguments": {"media_type": "movie"}})),
    );
    assert!(server.handle_request(tool_notification).await.is_none());
    assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
}

// ========== RESOURCE TESTS ==========

#[tokio::test]
async fn test_resources_list_and_read() {
    let (server, _) = server();

    let list = call(&server, 10, "resources/list", None).await;
    let resources = list.result.unwrap()["resources"].as_array().unwrap().clone();
    assert_eq!(resources.len(), 3);
    assert!(resources.iter().all(|r| r["mimeType"] == "application/json"));

    let read = call(
        &server,
        11,
        "resources/read",
        Some(json!({"uri": "config://movie-api"})),
    )
    .await;
    let result = read.result.unwrap();
    let content = &result["contents"][0];
    assert_eq!(content["uri"], "config://movie-api");
    assert_eq!(content["mimeType"], "application/json");

    let text = content["text"].as_str().unwrap();
    assert!(!text.contains("secret"));
    let payload: Value = serde_json::from_str(text).unwrap();
    assert_eq!(payload["current_config"]["api_key_configured"], true);
}

#[tokio::test]
async fn test_genre_resource_reflects_warmed_cache() {
    let (server, gateway) = server();

    let before = read_genres(&server, 12).await;
    assert_eq!(before["movies"], json!([]));
    assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);

    call(
        &server,
        13,
        "tools/call",
        Some(json!({"name": "get_trending", "arguments": {"media_type": "movie", "time_window": "week"}})),
    )
    .await;

    let after = read_genres(&server, 14).await;
    assert_eq!(after["movies"], json!([{"id": 28, "name": "Action"}]));
    assert_eq!(after["tv"], json!([{"id": 18, "name": "Drama"}]));
}

#[tokio::test]
async fn test_unknown_resource_is_invalid_params() {
    let (server, _) = server();

    let response = call(
        &server,
        15,
        "resources/read",
        Some(json!({"uri": "data://nothing"})),
    )
    .await;

    let error = response.error.unwrap();
    assert_eq!(error.code, -32602);
    assert_eq!(error.message, "Unknown resource: data://nothing");
}

// ========== STDIO TRANSPORT TESTS ==========

#[tokio::test]
async fn test_stdio_session() {
    let (server, _) = server();
    let input = [
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        "",
        r#"{"jsonrpc":"2.0","id":"two","method":"tools/list"}"#,
        "this is not json",
        r#"{"jsonrpc":"2.0","id":3}"#,
        r#"{"jsonrpc":"2.0","id":4,"method":"ping"}"#,
    ]
    .join("\n");

    let mut output = Vec::new();
    stdio::serve(&server, input.as_bytes(), &mut output)
        .await
        .unwrap();

    let responses: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    // One response per request; the notification and blank line produce none
    assert_eq!(responses.len(), 5);

    assert_eq!(responses[0]["id"], 1);
    assert_eq!(responses[0]["result"]["protocolVersion"], "2024-11-05");

    assert_eq!(responses[1]["id"], "two");
    assert_eq!(responses[1]["result"]["tools"].as_array().unwrap().len(), 6);

    assert!(responses[2]["id"].is_null());
    assert_eq!(responses[2]["error"]["code"], -32700);

    assert_eq!(responses[3]["id"], 3);
    assert_eq!(responses[3]["error"]["code"], -32600);

    assert_eq!(responses[4]["id"], 4);
    assert_eq!(responses[4]["result"], json!({}));
}

#[tokio::test]
async fn test_stdio_empty_input() {
    let (server, _) = server();
    let mut output = Vec::new();

    stdio::serve(&server, &b""[..], &mut output).await.unwrap();

    assert!(output.is_empty());
}
