//! Serve command implementation.

use crate::mcp::{stdio, McpServer};
use crate::models::config::Config;
use crate::Result;

/// Run the MCP server on stdio until input closes.
pub async fn serve(config: &Config) -> Result<()> {
    let server = McpServer::from_config(&config.tmdb)?;
    stdio::run_stdio_server(&server).await
}
