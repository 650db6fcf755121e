//! Model Context Protocol surface: JSON-RPC types, tool and resource
//! registries, request dispatch and the stdio transport.

pub mod protocol;
pub mod resources;
pub mod server;
pub mod stdio;
pub mod tools;

pub use server::McpServer;
