//! STDIO transport.
//!
//! One JSON-RPC message per line in each direction. Blank lines are skipped
//! and the loop ends at end of input. Stdout carries only protocol messages;
//! logs go to stderr.

use crate::mcp::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, RequestId};
use crate::mcp::server::McpServer;
use crate::Result;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

/// Serve on the process's stdin and stdout.
pub async fn run_stdio_server(server: &McpServer) -> Result<()> {
    tracing::info!("Starting MCP server on stdio");
    serve(server, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await
}

/// Serve requests read from `reader`, writing responses to `writer`.
pub async fn serve<R, W>(server: &McpServer, reader: R, mut writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<JsonRpcRequest>(line) {
            Ok(request) => server.handle_request(request).await,
            Err(e) => Some(reject(line, e)),
        };

        if let Some(response) = response {
            write_message(&mut writer, &response).await?;
        }
    }

    tracing::info!("Input closed, shutting down");
    Ok(())
}

/// Error response for a line that is not a valid request. Well-formed JSON
/// that is not a request keeps its id when one can be read.
fn reject(line: &str, err: serde_json::Error) -> JsonRpcResponse {
    match serde_json::from_str::<Value>(line) {
        Ok(value) => {
            tracing::warn!("Invalid request: {}", err);
            let id = value
                .get("id")
                .cloned()
                .and_then(|id| serde_json::from_value::<RequestId>(id).ok());
            JsonRpcResponse::error(id, JsonRpcError::invalid_request(err))
        }
        Err(_) => {
            tracing::warn!("Parse error: {}", err);
            JsonRpcResponse::error(None, JsonRpcError::parse_error(err))
        }
    }
}

async fn write_message<W>(writer: &mut W, response: &JsonRpcResponse) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut output = serde_json::to_string(response)?;
    output.push('\n');
    writer.write_all(output.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}
