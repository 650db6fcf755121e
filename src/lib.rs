//! Movie & TV MCP Library
//!
//! Adapts the TMDb movie and TV API into MCP tools and resources.

pub mod cli;
pub mod core;
pub mod error;
pub mod mcp;
pub mod models;
pub mod preflight;
pub mod services;

pub use error::{ApiError, ApiResult, Error, Result};
