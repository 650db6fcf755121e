//! Command line argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Movie & TV MCP server - TMDb search, details, trending and discovery as MCP tools
#[derive(Parser, Debug)]
#[command(name = "movie-tv-mcp")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (debug logs on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a TOML configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the MCP server on stdin/stdout (default)
    Serve,

    /// Check that the API key is configured and accepted by TMDb
    Check,

    /// Invoke one tool and print its JSON result
    Call {
        /// Tool name, e.g. search_movies
        #[arg(value_name = "TOOL")]
        tool: String,

        /// Tool arguments as a JSON object
        #[arg(short, long, value_name = "JSON", default_value = "{}")]
        args: String,
    },

    /// Print a static resource
    Resource {
        /// Resource URI, e.g. config://movie-api
        #[arg(value_name = "URI")]
        uri: String,
    },
}

impl Cli {
    /// The subcommand to run; `serve` when none is given.
    pub fn command_or_default(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }
}
