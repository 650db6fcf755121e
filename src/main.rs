//! Movie & TV MCP server
//!
//! Exposes TMDb movie and TV lookups as MCP tools over stdio.

use clap::Parser;
use movie_tv_mcp::cli::{
    args::{Cli, Commands},
    commands::{call, check, resource, serve},
};
use movie_tv_mcp::error::SETUP_URL;
use movie_tv_mcp::models::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Environment wins over .env, which wins over the config file
    dotenvy::dotenv().ok();
    let config = Config::load(cli.config.as_deref())?;

    // Initialize logging
    init_logging(cli.verbose || config.debug);
    for warning in &config.warnings {
        tracing::warn!("{}", warning);
    }

    if config.debug {
        tracing::debug!("Configuration: {:?}", config.tmdb);
    }
    if !config.tmdb.api_key_configured() {
        tracing::warn!(
            "TMDB_API_KEY is not set; tools will return errors. Get a key at {}",
            SETUP_URL
        );
    }

    // Run the appropriate command
    match cli.command_or_default() {
        Commands::Serve => {
            serve::serve(&config).await?;
        }

        Commands::Check => {
            check::check(&config).await?;
        }

        Commands::Call { tool, args } => {
            call::call(&config, &tool, &args).await?;
        }

        Commands::Resource { uri } => {
            resource::resource(&config, &uri)?;
        }
    }

    Ok(())
}

/// Initialize the logging system. Stdout carries the protocol, so logs go to stderr.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("movie_tv_mcp=debug")
    } else {
        EnvFilter::new("movie_tv_mcp=info")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(filter)
        .init();
}
