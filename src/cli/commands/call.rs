//! Call command implementation.
//!
//! Runs a single tool outside of an MCP session, for scripting and debugging.

use crate::mcp::{tools, McpServer};
use crate::models::config::Config;
use crate::{Error, Result};
use serde_json::Value;

/// Invoke `tool` with JSON `args` and print the result envelope.
///
/// Returns an error when the tool is unknown or reports `success: false`,
/// after printing the envelope.
pub async fn call(config: &Config, tool: &str, args: &str) -> Result<()> {
    let arguments: Value = serde_json::from_str(args)
        .map_err(|e| Error::other(format!("--args is not valid JSON: {}", e)))?;

    let server = McpServer::from_config(&config.tmdb)?;
    let envelope = tools::call_tool(server.tools(), tool, arguments)
        .await
        .ok_or_else(|| {
            Error::other(format!(
                "Unknown tool: {} (available: {})",
                tool,
                tools::TOOL_NAMES.join(", ")
            ))
        })?;

    println!("{}", serde_json::to_string_pretty(&envelope)?);

    if envelope.get("success").and_then(Value::as_bool) != Some(true) {
        return Err(Error::other(format!("{} reported an error", tool)));
    }

    Ok(())
}
