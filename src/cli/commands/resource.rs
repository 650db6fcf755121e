//! Resource command implementation.

use crate::core::genres::GenreCache;
use crate::mcp::resources::ResourceManager;
use crate::models::config::Config;
use crate::Result;
use std::sync::Arc;

/// Print the resource at `uri`.
///
/// Runs without a session, so the genre lists are always empty here.
pub fn resource(config: &Config, uri: &str) -> Result<()> {
    let manager = ResourceManager::new(config.tmdb.clone(), Arc::new(GenreCache::new()));
    let content = manager.read_resource(uri)?;
    println!("{}", content.text);
    Ok(())
}
