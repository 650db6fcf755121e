//! MCP method dispatch.

use crate::core::genres::GenreCache;
use crate::core::handlers::ToolHandlers;
use crate::mcp::protocol::{
    error_codes, InitializeResult, JsonRpcError, JsonRpcRequest, JsonRpcResponse, RequestId,
    ResourceListResult, ResourceReadParams, ResourceReadResult, ResourcesCapability,
    ServerCapabilities, ServerInfo, ToolCallParams, ToolCallResult, ToolContent, ToolListResult,
    ToolsCapability, JSONRPC_VERSION, MCP_VERSION,
};
use crate::mcp::resources::ResourceManager;
use crate::mcp::tools;
use crate::models::config::TmdbConfig;
use crate::services::tmdb::{Gateway, TmdbClient};
use crate::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

pub const SERVER_NAME: &str = "movie-tv-mcp";

/// The movie/TV MCP server: six tools and three resources over one gateway.
pub struct McpServer {
    tools: ToolHandlers,
    resources: ResourceManager,
}

impl McpServer {
    pub fn new(tools: ToolHandlers, resources: ResourceManager) -> Self {
        Self { tools, resources }
    }

    /// Build a server backed by the real TMDb client.
    pub fn from_config(config: &TmdbConfig) -> Result<Self> {
        let client = TmdbClient::new(config.clone())?;
        Ok(Self::with_gateway(config.clone(), Arc::new(client)))
    }

    /// Build a server over any gateway, with a fresh genre cache shared by
    /// the tools and the genre resource.
    pub fn with_gateway(config: TmdbConfig, gateway: Arc<dyn Gateway>) -> Self {
        let genres = Arc::new(GenreCache::new());
        let tools = ToolHandlers::new(gateway, genres.clone(), config.image_base_url.clone());
        let resources = ResourceManager::new(config, genres);
        Self::new(tools, resources)
    }

    pub fn tools(&self) -> &ToolHandlers {
        &self.tools
    }

    pub fn resources(&self) -> &ResourceManager {
        &self.resources
    }

    /// Handle one request. Notifications produce no response.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id else {
            tracing::debug!("Notification: {}", request.method);
            return None;
        };

        tracing::debug!(method = %request.method, id = ?id, "Processing request");

        if request.jsonrpc != JSONRPC_VERSION {
            return Some(JsonRpcResponse::error(
                Some(id),
                JsonRpcError::invalid_request(format!("unsupported jsonrpc version {:?}", request.jsonrpc)),
            ));
        }

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(id),
            "ping" => JsonRpcResponse::success(Some(id), json!({})),
            "tools/list" => respond(id, &ToolListResult { tools: tools::definitions() }),
            "tools/call" => self.handle_tools_call(id, request.params).await,
            "resources/list" => respond(
                id,
                &ResourceListResult {
                    resources: ResourceManager::list_resources(),
                },
            ),
            "resources/read" => self.handle_resources_read(id, request.params),
            _ => {
                tracing::warn!("Unknown method: {}", request.method);
                JsonRpcResponse::error(Some(id), JsonRpcError::method_not_found(&request.method))
            }
        };

        Some(response)
    }

    fn handle_initialize(&self, id: RequestId) -> JsonRpcResponse {
        tracing::info!("Initializing MCP session");

        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
                resources: ResourcesCapability {
                    subscribe: false,
                    list_changed: false,
                },
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        respond(id, &result)
    }

    async fn handle_tools_call(&self, id: RequestId, params: Option<Value>) -> JsonRpcResponse {
        let params: ToolCallParams = match parse_params(params) {
            Ok(params) => params,
            Err(e) => return JsonRpcResponse::error(Some(id), e),
        };

        tracing::info!("Calling tool {}", params.name);

        let arguments = params.arguments.unwrap_or(Value::Null);
        let Some(envelope) = tools::call_tool(&self.tools, &params.name, arguments).await else {
            tracing::warn!("Unknown tool: {}", params.name);
            return JsonRpcResponse::error(
                Some(id),
                JsonRpcError::new(
                    error_codes::METHOD_NOT_FOUND,
                    format!("Unknown tool: {}", params.name),
                ),
            );
        };

        let is_error = envelope.get("success").and_then(Value::as_bool) != Some(true);
        let text = match serde_json::to_string_pretty(&envelope) {
            Ok(text) => text,
            Err(e) => {
                return JsonRpcResponse::error(Some(id), JsonRpcError::internal_error(e.to_string()))
            }
        };

        respond(
            id,
            &ToolCallResult {
                content: vec![ToolContent::text(text)],
                is_error,
            },
        )
    }

    fn handle_resources_read(&self, id: RequestId, params: Option<Value>) -> JsonRpcResponse {
        let params: ResourceReadParams = match parse_params(params) {
            Ok(params) => params,
            Err(e) => return JsonRpcResponse::error(Some(id), e),
        };

        tracing::info!("Reading resource {}", params.uri);

        match self.resources.read_resource(&params.uri) {
            Ok(content) => respond(
                id,
                &ResourceReadResult {
                    contents: vec![content],
                },
            ),
            Err(e) => {
                tracing::warn!("{}", e);
                JsonRpcResponse::error(Some(id), JsonRpcError::invalid_params(e.to_string()))
            }
        }
    }
}

fn parse_params<T: DeserializeOwned>(params: Option<Value>) -> std::result::Result<T, JsonRpcError> {
    let params = params.ok_or_else(|| JsonRpcError::invalid_params("Missing parameters"))?;
    serde_json::from_value(params)
        .map_err(|e| JsonRpcError::invalid_params(format!("Invalid parameters: {}", e)))
}

fn respond<T: Serialize>(id: RequestId, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(Some(id), value),
        Err(e) => JsonRpcResponse::error(Some(id), JsonRpcError::internal_error(e.to_string())),
    }
}
